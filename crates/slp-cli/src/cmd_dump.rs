/// Implementation of `slp-probe dump`.
///
/// Prints each encoded case as a hex dump, the declared lengths read back
/// from the datagram next to the bytes actually present, and what a strict
/// reference parser makes of it. Nothing is sent.
///
/// ```text
/// Case 5: Invalid Lang Tag Length (overflow)  (24 bytes)
///   declared length 0xFF, language tag length 32 (10 present), 0 body bytes
///   0000  02 09 00 00 ff 00 00 00 00 00 00 00 00 20 41 41  ............. AA
///   0010  41 41 41 41 41 41 41 41                          AAAAAAAA
///   ✗ rejected (error code 2): invalid header: language tag declares 32 bytes ...
/// ```
use std::fmt::Write as _;

use anyhow::{Context, Result, bail};
use slp_decoder::SlpDecoder;
use slp_harness::{Catalog, EncodedCase};
use slp_wire::WireError;
use slp_wire::header::{HEADER_FIXED_SIZE, declared_lang_tag_len, declared_length};

use crate::DumpArgs;

pub fn run(args: &DumpArgs) -> Result<()> {
    let catalog = Catalog::standard().context("building case catalog")?;

    match args.case {
        Some(n) => {
            let Some(case) = n.checked_sub(1).and_then(|i| catalog.get(i)) else {
                bail!("no case {n}: the catalog has cases 1 to {}", catalog.len());
            };
            print!("{}", render_case(n, case, args.limit)?);
        }
        None => {
            for (i, case) in catalog.iter().enumerate() {
                if i > 0 {
                    println!();
                }
                print!("{}", render_case(i + 1, case, args.limit)?);
            }
        }
    }
    Ok(())
}

/// Declared lengths next to what the datagram really carries.
#[derive(Debug, PartialEq, Eq)]
struct LengthSummary {
    declared_length: u32,
    declared_tag_len: u16,
    /// Tag bytes actually present after the fixed header.
    tag_present: usize,
    /// Bytes after the tag, counted against the declared tag length.
    body: usize,
}

fn length_summary(datagram: &[u8]) -> Result<LengthSummary, WireError> {
    let declared_length = declared_length(datagram)?;
    let declared_tag_len = declared_lang_tag_len(datagram)?;
    let after_header = datagram.len() - HEADER_FIXED_SIZE;
    let tag_present = after_header.min(usize::from(declared_tag_len));
    Ok(LengthSummary {
        declared_length,
        declared_tag_len,
        tag_present,
        body: after_header - tag_present,
    })
}

fn render_case(number: usize, case: &EncodedCase, limit: usize) -> Result<String> {
    let datagram = &case.datagram;
    let summary = length_summary(datagram)?;
    let mut out = String::new();

    writeln!(out, "Case {number}: {}  ({} bytes)", case.name, datagram.len())?;
    writeln!(
        out,
        "  declared length {:#04X}, language tag length {} ({} present), {} body bytes",
        summary.declared_length, summary.declared_tag_len, summary.tag_present, summary.body
    )?;

    let shown = &datagram[..datagram.len().min(limit)];
    for (i, chunk) in shown.chunks(16).enumerate() {
        writeln!(out, "  {:04x}  {:<47}  {}", i * 16, hex_line(chunk), ascii_line(chunk))?;
    }
    if shown.len() < datagram.len() {
        writeln!(out, "  ... {} more bytes", datagram.len() - shown.len())?;
    }

    match SlpDecoder::decode(datagram) {
        Ok(_) => writeln!(out, "  ✓ accepted by reference parser")?,
        Err(e) => writeln!(out, "  ✗ rejected (error code {}): {e}", e.error_code())?,
    }
    Ok(out)
}

fn hex_line(chunk: &[u8]) -> String {
    chunk
        .iter()
        .fold(String::with_capacity(chunk.len() * 3), |mut s, b| {
            if !s.is_empty() {
                s.push(' ');
            }
            let _ = write!(s, "{b:02x}");
            s
        })
}

fn ascii_line(chunk: &[u8]) -> String {
    chunk
        .iter()
        .map(|&b| if b.is_ascii_graphic() { b as char } else { '.' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn case(index: usize) -> EncodedCase {
        Catalog::standard().unwrap().get(index).cloned().unwrap()
    }

    #[test]
    fn extreme_tag_length_counts_fill_as_tag() {
        let summary = length_summary(&case(0).datagram).unwrap();
        assert_eq!(
            summary,
            LengthSummary {
                declared_length: 0xFF,
                declared_tag_len: 0xFFFF,
                tag_present: 65_000,
                body: 0,
            }
        );
    }

    #[test]
    fn overflow_case_has_ten_of_thirty_two() {
        let summary = length_summary(&case(4).datagram).unwrap();
        assert_eq!(summary.declared_tag_len, 32);
        assert_eq!(summary.tag_present, 10);
        assert_eq!(summary.body, 0);
    }

    #[test]
    fn control_cases_split_tag_from_body() {
        let findsrvtypes = length_summary(&case(5).datagram).unwrap();
        assert_eq!(findsrvtypes.declared_length, 0x1D);
        assert_eq!(findsrvtypes.declared_tag_len, 2);
        assert_eq!(findsrvtypes.tag_present, 2);
        assert_eq!(findsrvtypes.body, 13);

        let findsrvs = length_summary(&case(6).datagram).unwrap();
        assert_eq!(findsrvs.tag_present, 2);
        assert_eq!(findsrvs.body, 53 - 16);
    }

    #[test]
    fn truncated_datagram_has_no_summary() {
        assert!(length_summary(&[0x02, 0x09, 0x00]).is_err());
    }

    #[test]
    fn render_findsrvtypes() {
        let out = render_case(6, &case(5), 64).unwrap();
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines[0], "Case 6: slptool findsrvtypes  (29 bytes)");
        assert_eq!(
            lines[1],
            "  declared length 0x1D, language tag length 2 (2 present), 13 body bytes"
        );
        assert_eq!(
            lines[2],
            "  0000  02 09 00 00 1d 00 00 00 00 00 74 e2 00 02 65 6e  ..........t...en"
        );
        assert!(lines[3].starts_with("  0010  00 00 ff ff 00 07 44 45"));
        assert!(lines[3].ends_with("....DEFAULT"));
        assert_eq!(lines[4], "  ✓ accepted by reference parser");
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn render_truncates_at_limit() {
        let out = render_case(1, &case(0), 32).unwrap();
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[4], "  ... 64982 more bytes");
        assert!(lines[5].starts_with("  ✗ rejected (error code 2)"));
    }

    #[test]
    fn hex_and_ascii_columns() {
        assert_eq!(hex_line(&[0x02, 0x09, 0xff]), "02 09 ff");
        assert_eq!(ascii_line(b"en\x00 A"), "en..A");
    }
}
