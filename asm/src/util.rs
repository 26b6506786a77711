use crate::encode::encode_line;
use crate::label::Labels;
use crate::parser::Line;
use arch::inst::Inst;
use color_print::cformat;

const RULE: &str = "-------------+-----------------------------------------------------";

/// Listing of the assembled source: address, byte and disassembly next to each source line.
pub fn dump(path: &str, src: &str, lines: &[Line], labels: &Labels) -> String {
    let mut out = format!(
        "{}+------[{}]{}\n",
        "-".repeat(13),
        path,
        "-".repeat(45_usize.saturating_sub(path.len()))
    );
    let mut parsed = lines.iter().peekable();

    for (idx, raw) in src.lines().enumerate() {
        let line_num = idx + 1;
        let line = parsed.next_if(|line| line.line_no == line_num);

        let body = match line.and_then(|line| line.addr.map(|addr| (line, addr))) {
            Some((line, addr)) => {
                let (bin, asm) = match encode_line(line, labels) {
                    Ok(Some(bin)) if line.is_data() => {
                        (format!("{:02X}", bin), cformat!("<c>data</> <y>0x{:02X}</>", bin))
                    }
                    Ok(Some(bin)) => (format!("{:02X}", bin), Inst::from_bin(bin).cformat()),
                    _ => (cformat!("<r,s>!!</>"), cformat!("<r,s>{:<9}</>", "")),
                };
                format!("[{:02X}] {} {:<9} | {:>4}: {}", addr, bin, asm, line_num, raw)
            }
            None => format!("{:13}| {:>4}: {}", "", line_num, raw),
        };
        out.push_str(&body);
        out.push('\n');
    }

    if !labels.is_empty() {
        out.push_str(RULE);
        out.push('\n');
        for (name, addr) in labels.iter() {
            out.push_str(&cformat!("<g>{:>11}</>  | [{:02X}]\n", name, addr));
        }
    }
    out.push_str(RULE);
    out.push('\n');
    out
}
