//! Piecewise closed form of doubling inside a register.

use bitwrap_register::Register;
use bitwrap_sim::predict_divergence;
use num_bigint::BigInt;
use num_traits::{One, Signed, Zero};

/// Describes `start * 2^n` under `register` as a piecewise function of `n`.
///
/// Before the predicted overflow point the register holds the exact power;
/// afterwards it holds the low `bits` bits, reinterpreted as negative in a
/// signed register when the top bit is set.
#[must_use]
pub fn formula(register: Register, start: &BigInt) -> String {
    let bits = register.bits();
    let term = term(start);

    let mut out = format!("General formula for {term} in {register}:\n");

    let Some(overflow) = predict_divergence(start, register) else {
        out.push_str("f(n) = 0 for all n\n");
        return out;
    };

    let modded = format!("{term} mod 2^{bits}");
    let pieces: Vec<(String, String)> = if register.is_signed() {
        vec![
            (term.clone(), format!("n < {overflow}")),
            (
                format!("({modded}) - 2^{bits}"),
                format!("n >= {overflow} and ({modded}) >= 2^{}", bits - 1),
            ),
            (
                modded.clone(),
                format!("n >= {overflow} and ({modded}) < 2^{}", bits - 1),
            ),
        ]
    } else {
        vec![
            (term.clone(), format!("n < {overflow}")),
            (modded, format!("n >= {overflow}")),
        ]
    };

    let width = pieces.iter().map(|(expr, _)| expr.len()).max().unwrap_or(0);
    for (expr, condition) in &pieces {
        out.push_str(&format!("f(n) = {expr:<width$}  for {condition}\n"));
    }

    if let Some(collapse) = collapse_point(start, bits) {
        out.push_str(&format!(
            "Every bit has been shifted out of the register from n = {collapse} on, so f(n) = 0 there.\n"
        ));
    }

    out
}

fn term(start: &BigInt) -> String {
    if start.is_one() {
        "2^n".to_string()
    } else if start.is_negative() {
        format!("({start}) * 2^n")
    } else {
        format!("{start} * 2^n")
    }
}

/// First `n` at which the lowest set bit of `start` leaves a `bits`-wide
/// register.
fn collapse_point(start: &BigInt, bits: u32) -> Option<u64> {
    if start.is_zero() {
        return None;
    }
    let trailing = start.trailing_zeros()?;
    Some(u64::from(bits).saturating_sub(trailing))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn squashed(text: &str) -> Vec<String> {
        text.lines()
            .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
            .collect()
    }

    #[test]
    fn int32_formula_matches_classic_text() {
        let text = formula(Register::I32, &BigInt::from(1));
        assert_eq!(
            squashed(&text),
            vec![
                "General formula for 2^n in i32:",
                "f(n) = 2^n for n < 31",
                "f(n) = (2^n mod 2^32) - 2^32 for n >= 31 and (2^n mod 2^32) >= 2^31",
                "f(n) = 2^n mod 2^32 for n >= 31 and (2^n mod 2^32) < 2^31",
                "Every bit has been shifted out of the register from n = 32 on, so f(n) = 0 there.",
            ]
        );
    }

    #[test]
    fn conditions_are_aligned() {
        let text = formula(Register::I32, &BigInt::from(1));
        let columns: Vec<usize> = text
            .lines()
            .filter(|l| l.starts_with("f(n)"))
            .filter_map(|l| l.find("  for "))
            .collect();
        assert_eq!(columns.len(), 3);
        assert!(columns.iter().all(|c| *c == columns[0]));
    }

    #[test]
    fn unsigned_formula_has_two_pieces() {
        let text = formula(Register::U64, &BigInt::from(3));
        let lines = squashed(&text);
        assert_eq!(lines[1], "f(n) = 3 * 2^n for n < 63");
        assert_eq!(lines[2], "f(n) = 3 * 2^n mod 2^64 for n >= 63");
        assert!(lines[3].contains("from n = 64 on"));
    }

    #[test]
    fn negative_start_is_parenthesized() {
        let text = formula(Register::signed(8).unwrap(), &BigInt::from(-4));
        assert!(text.contains("General formula for (-4) * 2^n in i8:"));
        assert!(text.contains("from n = 6 on"));
    }

    #[test]
    fn zero_start_is_constant() {
        let text = formula(Register::I32, &BigInt::from(0));
        assert!(text.ends_with("f(n) = 0 for all n\n"));
    }
}
