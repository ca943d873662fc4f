//! Bounded message log drawn in the HUD.
use std::collections::VecDeque;

use crate::color::{self, Rgb};
use crate::map::Glyph;

use super::CellRegion;

/// One log entry. Consecutive identical texts stack into a single entry.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Message {
    pub text: String,
    pub fg: Rgb,
    pub count: u32,
}

impl Message {
    pub fn new(text: impl Into<String>, fg: Rgb) -> Self {
        Self {
            text: text.into(),
            fg,
            count: 1,
        }
    }

    /// Text with the repeat counter appended, e.g. `"You hit (x3)"`.
    pub fn full_text(&self) -> String {
        if self.count > 1 {
            format!("{} (x{})", self.text, self.count)
        } else {
            self.text.clone()
        }
    }
}

/// Circular buffer of messages displayed to the player.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MessageLog {
    messages: VecDeque<Message>,
    capacity: usize,
}

impl MessageLog {
    pub fn new(capacity: usize) -> Self {
        let bounded_capacity = capacity.max(1);
        Self {
            messages: VecDeque::with_capacity(bounded_capacity),
            capacity: bounded_capacity,
        }
    }

    /// Appends `text`, stacking onto the newest entry when the text repeats.
    pub fn add_message(&mut self, text: impl Into<String>, fg: Rgb) {
        self.push(text.into(), fg, true);
    }

    /// Appends `text` as a new entry even if it repeats the newest one.
    pub fn add_unstacked(&mut self, text: impl Into<String>, fg: Rgb) {
        self.push(text.into(), fg, false);
    }

    fn push(&mut self, text: String, fg: Rgb, stack: bool) {
        if stack {
            if let Some(last) = self.messages.back_mut() {
                if last.text == text {
                    last.count += 1;
                    return;
                }
            }
        }
        if self.messages.len() == self.capacity {
            self.messages.pop_front();
        }
        self.messages.push_back(Message::new(text, fg));
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter()
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    /// Lays out the newest messages bottom-up in a `width × height` block.
    pub fn render(&self, width: usize, height: usize) -> CellRegion {
        let mut region = CellRegion::filled(width, height, Glyph::new(' ', color::WHITE, color::BLACK));
        let mut remaining = height;
        for message in self.messages.iter().rev() {
            for line in wrap(&message.full_text(), width).iter().rev() {
                if remaining == 0 {
                    return region;
                }
                remaining -= 1;
                region.print(0, remaining, line, message.fg);
            }
        }
        region
    }
}

impl Default for MessageLog {
    fn default() -> Self {
        Self::new(crate::config::GameConfig::DEFAULT_MESSAGE_CAPACITY)
    }
}

/// Greedy word wrap to `width` columns.
///
/// Explicit newlines are kept as line breaks; words longer than a line are
/// split across lines.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut line = String::new();
        let mut line_len = 0;
        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();
            if line_len > 0 && line_len + 1 + word.len() <= width {
                line.push(' ');
                line.extend(word.iter());
                line_len += 1 + word.len();
                continue;
            }
            if line_len > 0 {
                lines.push(std::mem::take(&mut line));
                line_len = 0;
            }
            while word.len() > width {
                let rest = word.split_off(width);
                lines.push(word.into_iter().collect());
                word = rest;
            }
            line_len = word.len();
            line.extend(word);
        }
        if line_len > 0 {
            lines.push(line);
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_messages_stack() {
        let mut log = MessageLog::new(8);
        log.add_message("The orc hits you.", color::ENEMY_ATK);
        log.add_message("The orc hits you.", color::ENEMY_ATK);
        log.add_message("The orc hits you.", color::ENEMY_ATK);
        log.add_unstacked("The orc hits you.", color::ENEMY_ATK);

        let texts: Vec<_> = log.iter().map(Message::full_text).collect();
        assert_eq!(texts, vec!["The orc hits you. (x3)", "The orc hits you."]);
    }

    #[test]
    fn oldest_messages_fall_off() {
        let mut log = MessageLog::new(2);
        for text in ["one", "two", "three"] {
            log.add_message(text, color::WHITE);
        }
        let texts: Vec<_> = log.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["two", "three"]);
    }

    #[test]
    fn wrap_breaks_on_words_and_long_words() {
        assert_eq!(wrap("the quick brown fox", 10), vec!["the quick", "brown fox"]);
        assert_eq!(wrap("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
        assert_eq!(wrap("a\n\nb", 4), vec!["a", "b"]);
        assert!(wrap("", 4).is_empty());
    }

    #[test]
    fn newest_message_is_on_the_bottom_row() {
        let mut log = MessageLog::new(8);
        log.add_message("first", color::WHITE);
        log.add_message("second message", color::ERROR);

        let region = log.render(8, 3);
        let row = |y: usize| -> String {
            (0..8).map(|x| region.get(x, y).map_or(' ', |c| c.ch)).collect()
        };

        assert_eq!(row(0), "first   ");
        assert_eq!(row(1), "second  ");
        assert_eq!(row(2), "message ");
        assert_eq!(region.get(0, 2).map(|c| c.fg), Some(color::ERROR));
    }
}
