use ratatui::{
    prelude::{Buffer, Rect},
    text::{Line, Span},
    widgets::Widget,
};

use crate::view::widgets::style;

/// One entry of the help line: alternative keys and what they do.
#[derive(Debug, Clone, Copy)]
pub struct KeyBinding {
    pub keys: &'static [&'static str],
    pub description: &'static str,
}

impl KeyBinding {
    pub const fn new(keys: &'static [&'static str], description: &'static str) -> Self {
        Self { keys, description }
    }
}

/// Single centered line listing key bindings.
#[derive(Debug)]
pub struct KeyBindingDisplay<'a> {
    bindings: &'a [KeyBinding],
}

impl<'a> KeyBindingDisplay<'a> {
    pub fn new(bindings: &'a [KeyBinding]) -> Self {
        Self { bindings }
    }
}

impl Widget for KeyBindingDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let mut spans = vec![];
        for (i, binding) in self.bindings.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" | ", style::KEY_SEPARATOR));
            }
            for (j, key) in binding.keys.iter().copied().enumerate() {
                if j > 0 {
                    spans.push(Span::styled("/", style::KEY_SEPARATOR));
                }
                spans.push(Span::styled(key, style::KEY));
            }
            spans.push(Span::from(" "));
            spans.push(Span::styled(binding.description, style::DESCRIPTION));
        }

        Line::from(spans).centered().render(area, buf);
    }
}
