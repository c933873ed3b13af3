use std::error::Error;

use clipboard::{ClipboardContext, ClipboardProvider};

pub trait ClipboardSink {
    fn set_text(&mut self, text: String) -> Result<(), Box<dyn Error>>;
}

/// OS clipboard; a fresh context per copy, as the provider may go away between copies.
pub struct SystemClipboard;

impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: String) -> Result<(), Box<dyn Error>> {
        let mut ctx: ClipboardContext = ClipboardProvider::new()?;
        ctx.set_contents(text)?;
        Ok(())
    }
}
