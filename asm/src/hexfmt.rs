use crate::{
    config::{Config, HexCase},
    error::{AsmError, Error},
};

/// Hex image: two hex digits per byte, `bytes_per_line` bytes per line, every line newline-terminated.
pub fn format(words: &[u8], cfg: &Config) -> String {
    words
        .chunks(cfg.bytes_per_line.max(1))
        .map(|chunk| {
            let bytes: Vec<String> = chunk
                .iter()
                .map(|word| match cfg.hex_case {
                    HexCase::Upper => format!("{:02X}", word),
                    HexCase::Lower => format!("{:02x}", word),
                })
                .collect();
            bytes.join(" ") + "\n"
        })
        .collect()
}

/// Read a hex image back into bytes. Accepts any number of bytes per line.
pub fn decode(text: &str) -> Result<Vec<u8>, AsmError> {
    let mut words = vec![];
    for (idx, line) in text.lines().enumerate() {
        for token in line.split_whitespace() {
            if token.len() != 2 || !token.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(AsmError::new(
                    idx + 1,
                    Error::LexError(format!("Invalid hex byte: `{}`", token)),
                ));
            }
            let word = u8::from_str_radix(token, 16).map_err(|e| {
                AsmError::new(idx + 1, Error::LexError(format!("`{}`: {}", token, e)))
            })?;
            words.push(word);
        }
    }
    Ok(words)
}
