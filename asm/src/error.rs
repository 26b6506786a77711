use color_print::cprintln;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Syntax Error: {0}")]
    LexError(String),

    #[error("Re-defined label: `{0}`")]
    DuplicateLabel(String, usize),

    #[error("Unknown operation: `{0}`")]
    UnknownMnemonic(String),

    #[error("`{0}` requires an operand")]
    MissingOperand(String),

    #[error("`{0}` takes no operand, found `{1}`")]
    UnexpectedOperand(String, String),

    #[error("Operand {0} does not fit in {1} bits")]
    OperandOutOfRange(u32, u32),

    #[error("Undefined label: `{0}`")]
    UndefinedSymbol(String),

    #[error("Label `{0}` is at 0x{1:02X}, which does not fit in 4 bits")]
    AddressOutOfRange(String, u8),

    #[error("Program does not fit in memory: no room for address 0x{0:X}")]
    MemoryOverflow(u16),

    #[error("Could not assemble due to {0} previous error(s)")]
    Aborted(usize),

    #[error("Failed to open file: {0}")]
    FileOpen(String, #[source] std::io::Error),

    #[error("Failed to read file: {0}")]
    FileRead(String, #[source] std::io::Error),

    #[error("Failed to create file: {0}")]
    FileCreate(String, #[source] std::io::Error),

    #[error("Failed to write file: {0}")]
    FileWrite(String, #[source] std::io::Error),

    #[error("Invalid config file: {0}")]
    ConfigParse(String, #[source] serde_yaml::Error),
}

/// An error tied to a source line (1-based).
#[derive(Error, Debug)]
#[error("line {line}: {kind}")]
pub struct AsmError {
    pub line: usize,
    pub kind: Error,
}

impl AsmError {
    pub fn new(line: usize, kind: Error) -> Self {
        AsmError { line, kind }
    }

    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    /// Print error with diagnostic information showing file location and line content
    pub fn print_diag(&self, file: &str, lines: &[&str]) {
        cprintln!("<red,bold>error</>: {}", self.kind);
        print_location(file, lines, self.line);

        if let Error::DuplicateLabel(_, first) = self.kind {
            cprintln!("<green,bold>note</>: first defined here");
            print_location(file, lines, first);
        }
    }
}

fn print_location(file: &str, lines: &[&str], line_num: usize) {
    let line_content = line_num
        .checked_sub(1)
        .and_then(|idx| lines.get(idx))
        .copied()
        .unwrap_or("");

    cprintln!("     <blue>--></> <underline>{}:{}</>", file, line_num);
    cprintln!("      <blue>|</>");
    cprintln!(" <blue>{:>4} |</> {}", line_num, line_content);
    cprintln!("      <blue>|</>");
}
