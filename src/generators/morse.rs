// src/generators/morse.rs
//! Text message encoded as an on/off Morse code bit stream

use super::{GeneratorState, SignalGenerator};
use crate::config::constants::morse::*;
use crate::error::{LedError, LedResult};
use crate::utils::validation::require_regular_file;
use std::path::Path;
use tracing::{debug, warn};

/// International Morse symbols for one character, `None` when unmappable
pub fn symbols_for(character: char) -> Option<&'static str> {
    let symbols = match character {
        'a' => ".-",
        'b' => "-...",
        'c' => "-.-.",
        'd' => "-..",
        'e' => ".",
        'f' => "..-.",
        'g' => "--.",
        'h' => "....",
        'i' => "..",
        'j' => ".---",
        'k' => "-.-",
        'l' => ".-..",
        'm' => "--",
        'n' => "-.",
        'o' => "---",
        'p' => ".--.",
        'q' => "--.-",
        'r' => ".-.",
        's' => "...",
        't' => "-",
        'u' => "..-",
        'v' => "...-",
        'w' => ".--",
        'x' => "-..-",
        'y' => "-.--",
        'z' => "--..",
        '0' => "-----",
        '1' => ".----",
        '2' => "..---",
        '3' => "...--",
        '4' => "....-",
        '5' => ".....",
        '6' => "-....",
        '7' => "--...",
        '8' => "---..",
        '9' => "----.",
        '.' => ".-.-.-",
        ',' => "--..--",
        '?' => "..--..",
        '\'' => ".----.",
        '!' => "-.-.--",
        '/' => "-..-.",
        '(' => "-.--.",
        ')' => "-.--.-",
        '&' => ".-...",
        ':' => "---...",
        ';' => "-.-.-.",
        '=' => "-...-",
        '+' => ".-.-.",
        '-' => "-....-",
        '_' => "..--.-",
        '"' => ".-..-.",
        '$' => "...-..-",
        '@' => ".--.-.",
        _ => return None,
    };
    Some(symbols)
}

/// Append the samples for one character, without the trailing character gap
fn encode_character(character: char, stream: &mut Vec<f64>) -> bool {
    if character == ' ' {
        stream.extend(std::iter::repeat(OFF).take(WORD_SPACE_SAMPLES));
        return true;
    }

    let Some(symbols) = symbols_for(character) else {
        return false;
    };
    for symbol in symbols.chars() {
        let on_samples = if symbol == '.' { DOT_ON_SAMPLES } else { DASH_ON_SAMPLES };
        stream.extend(std::iter::repeat(ON).take(on_samples));
        stream.extend(std::iter::repeat(OFF).take(SYMBOL_GAP_SAMPLES));
    }
    true
}

/// Lower-case the text, turn line breaks (`\n`, `\r\n` or a lone `\r`) into spaces and trim it
pub fn normalize_message(text: &str) -> String {
    text.to_lowercase()
        .replace("\r\n", " ")
        .replace(['\n', '\r'], " ")
        .trim()
        .to_string()
}

/// Finite generator replaying a message as Morse code
#[derive(Debug, Clone, PartialEq)]
pub struct MorseCode {
    message: String,
    stream: Vec<f64>,
    state: GeneratorState,
}

impl MorseCode {
    /// Read a message from a text file
    pub fn from_file(path: impl AsRef<Path>) -> LedResult<Self> {
        let path = path.as_ref();
        require_regular_file(path)?;
        let text = std::fs::read_to_string(path)?;
        debug!(path = %path.display(), "loaded Morse code message");
        Self::from_text(&text)
    }

    /// Encode a message; fails without building a stream if any character is unmappable
    pub fn from_text(text: &str) -> LedResult<Self> {
        let message = normalize_message(text);

        let mut stream = Vec::new();
        let mut unmappable = 0;
        for character in message.chars() {
            if encode_character(character, &mut stream) {
                stream.extend(std::iter::repeat(OFF).take(CHARACTER_GAP_SAMPLES));
            } else {
                unmappable += 1;
            }
        }

        if unmappable > 0 {
            warn!(unmappable, "message contains characters without Morse symbols");
            return Err(LedError::UnmappableInput { count: unmappable });
        }

        debug!(characters = message.chars().count(), stream_length = stream.len(), "encoded Morse code stream");
        Ok(Self {
            message,
            stream,
            state: GeneratorState::new(),
        })
    }

    /// Normalized message text
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Total number of samples in the encoded stream
    pub fn stream_length(&self) -> usize {
        self.stream.len()
    }

    /// Encoded on/off samples, in playback order
    pub fn stream(&self) -> &[f64] {
        &self.stream
    }
}

impl SignalGenerator for MorseCode {
    fn next_value(&mut self) -> Option<f64> {
        self.state.pull_from(&self.stream)
    }

    fn current(&self) -> Option<f64> {
        self.state.current()
    }

    fn counter(&self) -> u64 {
        self.state.counter()
    }

    fn is_finite(&self) -> bool {
        true
    }

    fn end_of_signal(&self) -> bool {
        self.state.end_of_signal()
    }
}
