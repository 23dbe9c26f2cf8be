//! Printf-style message formatting for event notes
//!
//! Event notes are written as printf templates with positional arguments.
//! Formatting never fails: a missing argument renders as `%!d(MISSING)`,
//! a mismatched verb as `%!d(string=abc)`, leftover arguments are appended
//! as `%!(EXTRA int=1, string=x)` and a dangling `%` as `%!(NOVERB)`.
//! Assertions may match on these degraded forms literally.

use crate::meta::NamespacedName;
use std::fmt::Write as _;

/// Widths and precisions above this are treated as malformed
const MAX_NUMBER: usize = 1_000_000;

/// Layout of an IEEE 754 double
const MANTISSA_BITS: u32 = 52;
const EXPONENT_BIAS: i64 = 1023;

/// A positional argument of a message template
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Str(String),
    Int(i64),
    Uint(u64),
    Float(f64),
    Bool(bool),
}

impl Arg {
    fn type_name(&self) -> &'static str {
        match self {
            Self::Str(_) => "string",
            Self::Int(_) => "int",
            Self::Uint(_) => "uint",
            Self::Float(_) => "float64",
            Self::Bool(_) => "bool",
        }
    }

    fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            Self::Uint(value) => i64::try_from(*value).ok(),
            _ => None,
        }
    }
}

impl From<&str> for Arg {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for Arg {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<&String> for Arg {
    fn from(value: &String) -> Self {
        Self::Str(value.clone())
    }
}

impl From<&NamespacedName> for Arg {
    fn from(value: &NamespacedName) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<bool> for Arg {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for Arg {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<f32> for Arg {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

macro_rules! arg_from_signed {
    ($($ty:ty),*) => {$(
        impl From<$ty> for Arg {
            fn from(value: $ty) -> Self {
                Self::Int(i64::from(value))
            }
        }
    )*};
}

macro_rules! arg_from_unsigned {
    ($($ty:ty),*) => {$(
        impl From<$ty> for Arg {
            fn from(value: $ty) -> Self {
                Self::Uint(u64::from(value))
            }
        }
    )*};
}

arg_from_signed!(i8, i16, i32, i64);
arg_from_unsigned!(u8, u16, u32, u64);

impl From<isize> for Arg {
    fn from(value: isize) -> Self {
        Self::Int(value as i64)
    }
}

impl From<usize> for Arg {
    fn from(value: usize) -> Self {
        Self::Uint(value as u64)
    }
}

/// Build a `&[Arg]` from heterogeneous values
///
/// ```
/// use kueue_testkit::{args, events::sprintf};
///
/// assert_eq!(sprintf("%s has %d pods", args!["job", 3]), "job has 3 pods");
/// ```
#[macro_export]
macro_rules! args {
    () => {
        &[] as &[$crate::events::Arg]
    };
    ($($arg:expr),+ $(,)?) => {
        &[$($crate::events::Arg::from($arg)),+]
    };
}

#[derive(Debug, Clone, Copy, Default)]
struct Flags {
    minus: bool,
    plus: bool,
    sharp: bool,
    space: bool,
    zero: bool,
    width: Option<usize>,
    precision: Option<usize>,
}

/// Format `template` with `args`, degrading instead of failing
pub fn sprintf(template: &str, args: &[Arg]) -> String {
    Printer::new(args).run(template)
}

struct Printer<'a> {
    args: &'a [Arg],
    out: String,
    arg_num: usize,
    reordered: bool,
    good_arg_num: bool,
}

impl<'a> Printer<'a> {
    fn new(args: &'a [Arg]) -> Self {
        Self {
            args,
            out: String::new(),
            arg_num: 0,
            reordered: false,
            good_arg_num: true,
        }
    }

    fn run(mut self, template: &str) -> String {
        let chars: Vec<char> = template.chars().collect();
        let end = chars.len();
        let mut i = 0;

        while i < end {
            self.good_arg_num = true;
            let start = i;
            while i < end && chars[i] != '%' {
                i += 1;
            }
            self.out.extend(&chars[start..i]);
            if i >= end {
                break;
            }
            i += 1;

            let mut flags = Flags::default();
            while i < end {
                match chars[i] {
                    '#' => flags.sharp = true,
                    '0' => flags.zero = !flags.minus,
                    '+' => flags.plus = true,
                    '-' => {
                        flags.minus = true;
                        flags.zero = false;
                    }
                    ' ' => flags.space = true,
                    _ => break,
                }
                i += 1;
            }

            let (next, mut after_index) = self.arg_number(&chars, i);
            i = next;

            if i < end && chars[i] == '*' {
                i += 1;
                match self.int_from_arg() {
                    Some(width) => {
                        if width < 0 {
                            flags.minus = true;
                            flags.zero = false;
                        }
                        flags.width = Some(width.unsigned_abs() as usize);
                    }
                    None => self.out.push_str("%!(BADWIDTH)"),
                }
                after_index = false;
            } else {
                let (width, next) = parse_number(&chars, i, end);
                i = next;
                flags.width = width;
                if after_index && width.is_some() {
                    self.good_arg_num = false;
                }
            }

            if i + 1 < end && chars[i] == '.' {
                i += 1;
                if after_index {
                    self.good_arg_num = false;
                }
                (i, after_index) = self.arg_number(&chars, i);
                if i < end && chars[i] == '*' {
                    i += 1;
                    match self.int_from_arg() {
                        Some(precision) if precision >= 0 => {
                            flags.precision = Some(precision as usize);
                        }
                        _ => self.out.push_str("%!(BADPREC)"),
                    }
                    after_index = false;
                } else {
                    let (precision, next) = parse_number(&chars, i, end);
                    i = next;
                    flags.precision = Some(precision.unwrap_or(0));
                }
            }

            if !after_index {
                (i, _) = self.arg_number(&chars, i);
            }

            if i >= end {
                self.out.push_str("%!(NOVERB)");
                break;
            }
            let verb = chars[i];
            i += 1;

            if verb == '%' {
                self.out.push('%');
            } else if !self.good_arg_num {
                let _ = write!(self.out, "%!{verb}(BADINDEX)");
            } else if self.arg_num >= self.args.len() {
                let _ = write!(self.out, "%!{verb}(MISSING)");
            } else {
                let arg = &self.args[self.arg_num];
                self.arg_num += 1;
                if verb == 'v' {
                    flags.plus = false;
                    flags.sharp = false;
                }
                print_arg(&mut self.out, arg, verb, &flags);
            }
        }

        if !self.reordered && self.arg_num < self.args.len() {
            self.out.push_str("%!(EXTRA ");
            for (position, arg) in self.args[self.arg_num..].iter().enumerate() {
                if position > 0 {
                    self.out.push_str(", ");
                }
                self.out.push_str(arg.type_name());
                self.out.push('=');
                print_arg(&mut self.out, arg, 'v', &Flags::default());
            }
            self.out.push(')');
        }
        self.out
    }

    /// Parse an explicit `[n]` argument index at `i`
    fn arg_number(&mut self, chars: &[char], i: usize) -> (usize, bool) {
        if i >= chars.len() || chars[i] != '[' {
            return (i, false);
        }
        self.reordered = true;

        let Some(close) = chars[i..].iter().position(|c| *c == ']').map(|p| i + p) else {
            self.good_arg_num = false;
            return (i + 1, false);
        };
        let (index, next) = parse_number(chars, i + 1, close);
        match index {
            Some(index) if next == close && index >= 1 && index <= self.args.len() => {
                self.arg_num = index - 1;
                (close + 1, true)
            }
            _ => {
                self.good_arg_num = false;
                (close + 1, next == close && index.is_some())
            }
        }
    }

    /// Consume the next argument as a `*` width or precision
    fn int_from_arg(&mut self) -> Option<i64> {
        let arg = self.args.get(self.arg_num)?;
        self.arg_num += 1;
        arg.as_int()
            .filter(|value| value.unsigned_abs() <= MAX_NUMBER as u64)
    }
}

fn parse_number(chars: &[char], start: usize, end: usize) -> (Option<usize>, usize) {
    let mut i = start;
    let mut number: usize = 0;
    while i < end {
        let Some(digit) = chars[i].to_digit(10) else {
            break;
        };
        number = number * 10 + digit as usize;
        if number > MAX_NUMBER {
            return (None, end);
        }
        i += 1;
    }
    if i == start {
        (None, start)
    } else {
        (Some(number), i)
    }
}

fn print_arg(out: &mut String, arg: &Arg, verb: char, flags: &Flags) {
    match (arg, verb) {
        (Arg::Bool(value), 't' | 'v') => pad(out, flags, if *value { "true" } else { "false" }),
        (Arg::Int(value), _) => print_integer(out, arg, value.unsigned_abs(), *value < 0, verb, flags),
        (Arg::Uint(value), _) => print_integer(out, arg, *value, false, verb, flags),
        (Arg::Float(value), 'v' | 'g' | 'G' | 'e' | 'E' | 'f' | 'F' | 'b' | 'x' | 'X') => {
            print_float(out, *value, verb, flags)
        }
        (Arg::Str(value), 'v' | 's') => {
            let truncated: String = match flags.precision {
                Some(precision) => value.chars().take(precision).collect(),
                None => value.clone(),
            };
            pad(out, flags, &truncated);
        }
        (Arg::Str(value), 'q') => pad(out, flags, &quote(value, flags.plus)),
        (Arg::Str(value), 'x' | 'X') => {
            let mut hex = String::new();
            if flags.sharp {
                hex.push_str(if verb == 'x' { "0x" } else { "0X" });
            }
            for byte in value.as_bytes() {
                let _ = if verb == 'x' {
                    write!(hex, "{byte:02x}")
                } else {
                    write!(hex, "{byte:02X}")
                };
            }
            pad(out, flags, &hex);
        }
        _ => bad_verb(out, arg, verb),
    }
}

fn bad_verb(out: &mut String, arg: &Arg, verb: char) {
    let _ = write!(out, "%!{verb}({}=", arg.type_name());
    print_arg(out, arg, 'v', &Flags::default());
    out.push(')');
}

fn print_integer(out: &mut String, arg: &Arg, magnitude: u64, negative: bool, verb: char, flags: &Flags) {
    let (digits, prefix) = match verb {
        'v' | 'd' => (magnitude.to_string(), ""),
        'b' => (format!("{magnitude:b}"), if flags.sharp { "0b" } else { "" }),
        'o' => (format!("{magnitude:o}"), if flags.sharp { "0" } else { "" }),
        'O' => (format!("{magnitude:o}"), "0o"),
        'x' => (format!("{magnitude:x}"), if flags.sharp { "0x" } else { "" }),
        'X' => (format!("{magnitude:X}"), if flags.sharp { "0X" } else { "" }),
        'c' | 'q' | 'U' => {
            let code = if negative { u64::MAX } else { magnitude };
            let ch = u32::try_from(code)
                .ok()
                .and_then(char::from_u32)
                .unwrap_or(char::REPLACEMENT_CHARACTER);
            let rendered = match verb {
                'c' => ch.to_string(),
                'q' => format!("'{}'", escape_char(ch, '\'', flags.plus)),
                _ => format!("U+{:04X}", u32::from(ch)),
            };
            pad(out, flags, &rendered);
            return;
        }
        _ => return bad_verb(out, arg, verb),
    };

    let sign = sign_of(negative, flags);
    let min_digits = match flags.precision {
        Some(0) if magnitude == 0 => {
            pad(out, flags, "");
            return;
        }
        Some(precision) => precision,
        None if flags.zero && !flags.minus => flags
            .width
            .map(|width| width.saturating_sub(sign.len()))
            .unwrap_or(0),
        None => 0,
    };

    let mut rendered = String::from(sign);
    rendered.push_str(prefix);
    for _ in digits.len()..min_digits {
        rendered.push('0');
    }
    rendered.push_str(&digits);
    pad(out, &Flags { zero: false, ..*flags }, &rendered);
}

fn print_float(out: &mut String, value: f64, verb: char, flags: &Flags) {
    if value.is_nan() {
        let sign = if flags.plus {
            "+"
        } else if flags.space {
            " "
        } else {
            ""
        };
        pad(out, &Flags { zero: false, ..*flags }, &format!("{sign}NaN"));
        return;
    }
    if value.is_infinite() {
        let sign = if value < 0.0 { "-" } else if flags.space && !flags.plus { " " } else { "+" };
        pad(out, &Flags { zero: false, ..*flags }, &format!("{sign}Inf"));
        return;
    }

    let magnitude = value.abs();
    let body = match verb {
        'e' | 'E' => {
            let precision = flags.precision.unwrap_or(6);
            let (digits, exp) = decimal_digits(&format!("{magnitude:.precision$e}"));
            format_exponent(&digits, exp, precision, verb == 'E')
        }
        'f' | 'F' => {
            let precision = flags.precision.unwrap_or(6);
            format!("{magnitude:.precision$}")
        }
        'b' => {
            let (mantissa, exp) = binary_parts(magnitude);
            format!("{mantissa}p{:+}", exp - i64::from(MANTISSA_BITS))
        }
        'x' | 'X' => format_hex(magnitude, flags.precision, verb == 'X'),
        _ => format_general(magnitude, flags.precision, verb == 'G'),
    };

    let sign = sign_of(value.is_sign_negative(), flags);
    if flags.zero && !flags.minus {
        let width = flags.width.unwrap_or(0);
        let used = sign.len() + body.chars().count();
        out.push_str(sign);
        for _ in used..width {
            out.push('0');
        }
        out.push_str(&body);
    } else {
        pad(out, flags, &format!("{sign}{body}"));
    }
}

fn sign_of(negative: bool, flags: &Flags) -> &'static str {
    if negative {
        "-"
    } else if flags.plus {
        "+"
    } else if flags.space {
        " "
    } else {
        ""
    }
}

/// `%g` rendering: shortest digits unless a precision is given, switching
/// to exponent form for small or large exponents
fn format_general(magnitude: f64, precision: Option<usize>, upper: bool) -> String {
    let (digits, exp) = match precision {
        None => decimal_digits(&format!("{magnitude:e}")),
        Some(precision) => {
            let significant = precision.max(1) - 1;
            let (mut digits, exp) = decimal_digits(&format!("{magnitude:.significant$e}"));
            while digits.len() > 1 && digits.ends_with('0') {
                digits.pop();
            }
            (digits, exp)
        }
    };

    let nd = digits.len() as i64;
    let dp = exp + 1;
    let mut prec = precision.map_or(nd, |p| p.max(1) as i64);
    let mut eprec = prec;
    if eprec > nd && nd >= dp {
        eprec = nd;
    }
    if precision.is_none() {
        eprec = 6;
    }

    if exp < -4 || exp >= eprec {
        let shown = prec.min(nd);
        return format_exponent(&digits, exp, (shown - 1).max(0) as usize, upper);
    }
    if prec > dp {
        prec = nd;
    }
    format_fixed(&digits, dp, (prec - dp).max(0) as usize)
}

/// Integer mantissa, including the implicit bit, and unbiased exponent
fn binary_parts(magnitude: f64) -> (u64, i64) {
    let bits = magnitude.to_bits();
    let biased = ((bits >> MANTISSA_BITS) & 0x7ff) as i64;
    let mantissa = bits & ((1 << MANTISSA_BITS) - 1);
    if biased == 0 {
        (mantissa, 1 - EXPONENT_BIAS)
    } else {
        (mantissa | (1 << MANTISSA_BITS), biased - EXPONENT_BIAS)
    }
}

/// Hexadecimal mantissa with a binary exponent, e.g. `0x1.8p+00`
fn format_hex(magnitude: f64, precision: Option<usize>, upper: bool) -> String {
    let (mut mantissa, mut exp) = binary_parts(magnitude);
    if mantissa == 0 {
        exp = 0;
    }

    // Normalize so the leading one sits at bit 60.
    mantissa <<= 60 - MANTISSA_BITS;
    while mantissa != 0 && mantissa & (1 << 60) == 0 {
        mantissa <<= 1;
        exp -= 1;
    }

    if let Some(precision) = precision.filter(|precision| *precision < 15) {
        let shift = precision as u32 * 4;
        let extra = (mantissa << shift) & ((1 << 60) - 1);
        mantissa >>= 60 - shift;
        if extra | (mantissa & 1) > 1 << 59 {
            mantissa += 1;
        }
        mantissa <<= 60 - shift;
        if mantissa & (1 << 61) != 0 {
            mantissa >>= 1;
            exp += 1;
        }
    }

    let digits: &[u8; 16] = if upper {
        b"0123456789ABCDEF"
    } else {
        b"0123456789abcdef"
    };
    let mut rendered = String::from(if upper { "0X" } else { "0x" });
    rendered.push(if (mantissa >> 60) & 1 == 1 { '1' } else { '0' });
    mantissa <<= 4;

    let fraction_digits = match precision {
        None if mantissa != 0 => None,
        None => Some(0),
        Some(precision) => Some(precision),
    };
    match fraction_digits {
        None => {
            rendered.push('.');
            while mantissa != 0 {
                rendered.push(char::from(digits[((mantissa >> 60) & 15) as usize]));
                mantissa <<= 4;
            }
        }
        Some(0) => {}
        Some(count) => {
            rendered.push('.');
            for _ in 0..count {
                rendered.push(char::from(digits[((mantissa >> 60) & 15) as usize]));
                mantissa <<= 4;
            }
        }
    }

    let _ = write!(
        rendered,
        "{}{}{:02}",
        if upper { 'P' } else { 'p' },
        if exp < 0 { '-' } else { '+' },
        exp.unsigned_abs()
    );
    rendered
}

/// Split Rust's `{:e}` output into significant digits and decimal exponent
fn decimal_digits(scientific: &str) -> (String, i64) {
    let (mantissa, exp) = scientific.split_once('e').unwrap_or((scientific, "0"));
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    (digits, exp.parse().unwrap_or(0))
}

fn format_exponent(digits: &str, exp: i64, precision: usize, upper: bool) -> String {
    let mut chars = digits.chars();
    let mut rendered = String::new();
    rendered.push(chars.next().unwrap_or('0'));
    if precision > 0 {
        rendered.push('.');
        for _ in 0..precision {
            rendered.push(chars.next().unwrap_or('0'));
        }
    }
    let exp_sign = if exp < 0 { '-' } else { '+' };
    let _ = write!(
        rendered,
        "{}{exp_sign}{:02}",
        if upper { 'E' } else { 'e' },
        exp.unsigned_abs()
    );
    rendered
}

fn format_fixed(digits: &str, dp: i64, fraction: usize) -> String {
    let digits = digits.as_bytes();
    let digit_at = |position: i64| -> char {
        usize::try_from(position)
            .ok()
            .and_then(|position| digits.get(position))
            .map_or('0', |digit| char::from(*digit))
    };

    let mut rendered = String::new();
    if dp > 0 {
        for position in 0..dp {
            rendered.push(digit_at(position));
        }
    } else {
        rendered.push('0');
    }
    if fraction > 0 {
        rendered.push('.');
        for offset in 0..fraction as i64 {
            rendered.push(digit_at(dp + offset));
        }
    }
    rendered
}

fn quote(value: &str, ascii_only: bool) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for ch in value.chars() {
        quoted.push_str(&escape_char(ch, '"', ascii_only));
    }
    quoted.push('"');
    quoted
}

fn escape_char(ch: char, delimiter: char, ascii_only: bool) -> String {
    match ch {
        '\u{7}' => "\\a".to_string(),
        '\u{8}' => "\\b".to_string(),
        '\u{c}' => "\\f".to_string(),
        '\n' => "\\n".to_string(),
        '\r' => "\\r".to_string(),
        '\t' => "\\t".to_string(),
        '\u{b}' => "\\v".to_string(),
        '\\' => "\\\\".to_string(),
        c if c == delimiter => format!("\\{c}"),
        c if (c as u32) < 0x20 || c == '\u{7f}' => format!("\\x{:02x}", c as u32),
        c if c.is_control() || (ascii_only && !c.is_ascii()) => {
            if (c as u32) > 0xffff {
                format!("\\U{:08x}", c as u32)
            } else {
                format!("\\u{:04x}", c as u32)
            }
        }
        c => c.to_string(),
    }
}

fn pad(out: &mut String, flags: &Flags, body: &str) {
    let len = body.chars().count();
    let fill = flags.width.unwrap_or(0).saturating_sub(len);
    if fill == 0 {
        out.push_str(body);
    } else if flags.minus {
        out.push_str(body);
        out.extend(std::iter::repeat_n(' ', fill));
    } else {
        let padding = if flags.zero { '0' } else { ' ' };
        out.extend(std::iter::repeat_n(padding, fill));
        out.push_str(body);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("job %s finished", args!["job-1"], "job job-1 finished")]
    #[case("%d pods, %v ready", args![3, true], "3 pods, true ready")]
    #[case("100%% done", args![], "100% done")]
    #[case("[%5s|%-5s]", args!["ab", "cd"], "[   ab|cd   ]")]
    #[case("%05d", args![-42], "-0042")]
    #[case("%x %X %#x", args![255, 255, 255], "ff FF 0xff")]
    #[case("%q", args!["a\"b\n"], "\"a\\\"b\\n\"")]
    #[case("%.2s", args!["kueue"], "ku")]
    #[case("%c%c", args![75, 117], "Ku")]
    #[case("%[2]s %[1]s", args!["world", "hello"], "hello world")]
    #[case("%*d", args![4, 7], "   7")]
    #[case("%+d % d", args![5, 5], "+5  5")]
    fn formats_like_printf(#[case] template: &str, #[case] args: &[Arg], #[case] expected: &str) {
        assert_eq!(sprintf(template, args), expected);
    }

    #[rstest]
    #[case(1.5, "1.5")]
    #[case(100000.0, "100000")]
    #[case(1000000.0, "1e+06")]
    #[case(1234567.0, "1.234567e+06")]
    #[case(0.0001, "0.0001")]
    #[case(0.00001, "1e-05")]
    #[case(0.0, "0")]
    #[case(-2.25, "-2.25")]
    #[case(f64::INFINITY, "+Inf")]
    #[case(f64::NAN, "NaN")]
    fn formats_floats_with_shortest_representation(#[case] value: f64, #[case] expected: &str) {
        assert_eq!(sprintf("%v", &[Arg::Float(value)]), expected);
    }

    #[rstest]
    #[case("%.2f", 3.14159, "3.14")]
    #[case("%f", 1.0, "1.000000")]
    #[case("%e", 123456.0, "1.234560e+05")]
    #[case("%.3g", 1234.5678, "1.23e+03")]
    #[case("%.3g", 0.5, "0.5")]
    #[case("%8.3f", -1.5, "  -1.500")]
    #[case("%08.3f", -1.5, "-001.500")]
    fn formats_floats_with_precision(#[case] template: &str, #[case] value: f64, #[case] expected: &str) {
        assert_eq!(sprintf(template, &[Arg::Float(value)]), expected);
    }

    #[rstest]
    #[case("job %s finished in %s", args!["job-1"], "job job-1 finished in %!s(MISSING)")]
    #[case("job finished", args!["job-1", 2], "job finished%!(EXTRA string=job-1, int=2)")]
    #[case("count %d", args!["three"], "count %!d(string=three)")]
    #[case("flag %s", args![true], "flag %!s(bool=true)")]
    #[case("ratio %d", args![0.5], "ratio %!d(float64=0.5)")]
    #[case("dangling %", args![], "dangling %!(NOVERB)")]
    #[case("%[3]s", args!["a"], "%!s(BADINDEX)")]
    #[case("%*d", args!["wide", 1], "%!(BADWIDTH)1")]
    #[case("%.*d", args![-1, 5], "%!(BADPREC)5")]
    #[case("%.*d", args!["two", 5], "%!(BADPREC)5")]
    fn degrades_instead_of_failing(#[case] template: &str, #[case] args: &[Arg], #[case] expected: &str) {
        assert_eq!(sprintf(template, args), expected);
    }

    #[rstest]
    #[case("%x", 1.5, "0x1.8p+00")]
    #[case("%X", 1.5, "0X1.8P+00")]
    #[case("%x", 1.0, "0x1p+00")]
    #[case("%x", -0.5, "-0x1p-01")]
    #[case("%x", 0.0, "0x0p+00")]
    #[case("%.1x", 1.0, "0x1.0p+00")]
    #[case("%x", 1024.0, "0x1p+10")]
    #[case("%b", 1.5, "6755399441055744p-52")]
    #[case("%b", 0.0, "0p-1074")]
    #[case("%b", -1.0, "-4503599627370496p-52")]
    fn formats_floats_with_binary_exponents(#[case] template: &str, #[case] value: f64, #[case] expected: &str) {
        assert_eq!(sprintf(template, &[Arg::Float(value)]), expected);
    }

    #[test]
    fn namespaced_names_format_as_strings() {
        let key = NamespacedName::new("ns", "wl");
        assert_eq!(sprintf("workload %s admitted", args![&key]), "workload ns/wl admitted");
    }

    #[test]
    fn non_ascii_template_text_is_preserved() {
        assert_eq!(sprintf("größe %d ✓", args![3]), "größe 3 ✓");
    }
}
