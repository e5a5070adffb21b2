//! Reading and writing of sample streams and PSDU payload files.
//!
//! Samples are written either as raw little endian `f32` (I, Q) pairs without any header, which is
//! what SDR front ends and FIFOs usually consume, or as text with one `<index> <I> <Q>` line per
//! sample for plotting and diffing.

use crate::bits::bits_from_str;
use crate::Sample;
use failure::{format_err, Error};
use std::io::{self, BufRead, Read, Write};
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SampleFormat {
    Binary,
    Text,
}

impl FromStr for SampleFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, String> {
        match s {
            "binary" | "bin" => Ok(SampleFormat::Binary),
            "text" | "txt" => Ok(SampleFormat::Text),
            _ => Err(format!("unknown sample format '{}'", s)),
        }
    }
}

/// Three decimals, without printing negative zero
fn fmt_component(x: f64) -> String {
    let s = format!("{:.3}", x);
    if s == "-0.000" {
        "0.000".to_string()
    } else {
        s
    }
}

/// Write `samples` to `w`. In text format lines are numbered from `start_index`.
pub fn write_samples<W: Write>(
    w: &mut W,
    samples: &[Sample],
    format: SampleFormat,
    start_index: usize,
) -> io::Result<()> {
    match format {
        SampleFormat::Binary => {
            let mut buf = Vec::with_capacity(samples.len() * 8);
            for s in samples {
                buf.extend_from_slice(&(s.re as f32).to_le_bytes());
                buf.extend_from_slice(&(s.im as f32).to_le_bytes());
            }
            w.write_all(&buf)
        }
        SampleFormat::Text => {
            for (i, s) in samples.iter().enumerate() {
                writeln!(
                    w,
                    "{} {} {}",
                    start_index + i,
                    fmt_component(s.re),
                    fmt_component(s.im)
                )?;
            }
            Ok(())
        }
    }
}

/// Read back samples in either format. Text lines may omit the index column; blank lines and
/// lines starting with '#' are skipped.
pub fn read_samples<R: BufRead>(r: &mut R, format: SampleFormat) -> Result<Vec<Sample>, Error> {
    match format {
        SampleFormat::Binary => {
            let mut raw = Vec::new();
            r.read_to_end(&mut raw)?;
            if raw.len() % 8 != 0 {
                return Err(format_err!(
                    "binary sample stream of {} bytes is not a whole number of samples",
                    raw.len()
                ));
            }
            Ok(raw
                .chunks(8)
                .map(|c| {
                    let re = f32::from_le_bytes([c[0], c[1], c[2], c[3]]);
                    let im = f32::from_le_bytes([c[4], c[5], c[6], c[7]]);
                    Sample::new(re as f64, im as f64)
                })
                .collect())
        }
        SampleFormat::Text => {
            let mut res = Vec::new();
            for line in r.lines() {
                let line = line?;
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }
                let fields: Vec<f64> = line
                    .split_whitespace()
                    .map(|f| f.parse())
                    .collect::<Result<_, _>>()
                    .map_err(|e| format_err!("bad sample line '{}': {}", line, e))?;
                match fields.len() {
                    2 => res.push(Sample::new(fields[0], fields[1])),
                    3 => res.push(Sample::new(fields[1], fields[2])),
                    _ => return Err(format_err!("bad sample line '{}'", line)),
                }
            }
            Ok(res)
        }
    }
}

/// Lines that carry payload, i.e. without '#' comment lines
fn payload_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().filter(|l| !l.trim_start().starts_with('#'))
}

/// Parse a hex payload file: groups of hex digits separated by whitespace or newlines, with '#'
/// starting a comment line. `"1b3f45da12 30b9\n4c6f"` is 9 bytes.
pub fn parse_hex_psdu(text: &str) -> Result<Vec<u8>, Error> {
    let mut res = Vec::new();
    for group in payload_lines(text).flat_map(|l| l.split_whitespace()) {
        if group.len() % 2 != 0 {
            return Err(format_err!("odd number of hex digits in '{}'", group));
        }
        for i in (0..group.len()).step_by(2) {
            let byte = group
                .get(i..i + 2)
                .and_then(|b| u8::from_str_radix(b, 16).ok())
                .ok_or_else(|| format_err!("invalid hex in '{}'", group))?;
            res.push(byte);
        }
    }
    Ok(res)
}

/// Parse a bit payload file: '0' and '1' in groups separated by whitespace, '#' comment lines.
/// The total number of bits must be a multiple of 8.
pub fn parse_bits_psdu(text: &str) -> Result<Vec<u8>, Error> {
    let mut bits = String::new();
    for group in payload_lines(text).flat_map(|l| l.split_whitespace()) {
        if let Some(c) = group.chars().find(|c| *c != '0' && *c != '1') {
            return Err(format_err!("invalid character '{}' in bit string", c));
        }
        bits.push_str(group);
    }
    if bits.len() % 8 != 0 {
        return Err(format_err!("{} bits is not a whole number of bytes", bits.len()));
    }
    Ok(bits_from_str(&bits))
}

/// Read a whole payload file from `r`
pub fn read_psdu<R: Read>(r: &mut R, bits: bool) -> Result<Vec<u8>, Error> {
    let mut text = String::new();
    r.read_to_string(&mut text)?;
    if bits {
        parse_bits_psdu(&text)
    } else {
        parse_hex_psdu(&text)
    }
}
