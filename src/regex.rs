//! Infix → postfix conversion, in the style of
//! <https://swtch.com/~rsc/regexp/regexp1.html>.
//!
//! The accepted surface syntax is intentionally small: concatenation
//! (implicit), alternation (`|`), Kleene star (`*`), grouping (`(` `)`), and
//! single-byte literals. `+` and `?` are recognized only so they can be
//! rejected with a clear error; their semantics are intentionally
//! unimplemented.

use crate::error::{Error, RegexSyntaxError};

const MAX_NESTING: usize = 100;

#[derive(Clone, Copy)]
struct ParenState {
    nalt: u32,
    natom: u32,
}

/// Converts an infix regex into postfix form, inserting `.` for explicit
/// concatenation and `|` for alternation. Literals pass through unchanged.
pub fn to_postfix(re: &str) -> Result<Vec<u8>, Error> {
    if re.is_empty() {
        return Err(syntax_error(re, RegexSyntaxError::EmptyExpression));
    }

    let mut nalt: u32 = 0;
    let mut natom: u32 = 0;
    let mut out: Vec<u8> = Vec::with_capacity(re.len() * 2);
    let mut paren_stack: Vec<ParenState> = Vec::new();

    for &ch in re.as_bytes() {
        match ch {
            b'(' => {
                if natom > 1 {
                    natom -= 1;
                    out.push(b'.');
                }
                if paren_stack.len() >= MAX_NESTING {
                    return Err(syntax_error(re, RegexSyntaxError::NestingTooDeep));
                }
                paren_stack.push(ParenState { nalt, natom });
                nalt = 0;
                natom = 0;
            }
            b'|' => {
                if natom == 0 {
                    return Err(syntax_error(re, RegexSyntaxError::AlternationWithNoAtoms));
                }
                while natom > 1 {
                    natom -= 1;
                    out.push(b'.');
                }
                natom = 0;
                nalt += 1;
            }
            b')' => {
                let saved = paren_stack
                    .pop()
                    .ok_or_else(|| syntax_error(re, RegexSyntaxError::UnmatchedParen))?;
                if natom == 0 {
                    return Err(syntax_error(re, RegexSyntaxError::EmptyGroup));
                }
                while natom > 1 {
                    natom -= 1;
                    out.push(b'.');
                }
                for _ in 0..nalt {
                    out.push(b'|');
                }
                nalt = saved.nalt;
                natom = saved.natom;
                natom += 1;
            }
            b'+' | b'?' => {
                if natom == 0 {
                    return Err(syntax_error(re, RegexSyntaxError::QuantifierWithoutAtom));
                }
                return Err(syntax_error(re, RegexSyntaxError::UnsupportedQuantifier));
            }
            b'*' => {
                if natom == 0 {
                    return Err(syntax_error(re, RegexSyntaxError::QuantifierWithoutAtom));
                }
                out.push(ch);
            }
            _ => {
                if natom > 1 {
                    natom -= 1;
                    out.push(b'.');
                }
                out.push(ch);
                natom += 1;
            }
        }
    }

    if !paren_stack.is_empty() {
        return Err(syntax_error(re, RegexSyntaxError::UnclosedParen));
    }
    while natom > 1 {
        natom -= 1;
        out.push(b'.');
    }
    for _ in 0..nalt {
        out.push(b'|');
    }

    Ok(out)
}

fn syntax_error(input: &str, reason: RegexSyntaxError) -> Error {
    Error::Regex {
        input: input.to_string(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RegexSyntaxError::*;

    fn post(re: &str) -> String {
        String::from_utf8(to_postfix(re).unwrap()).unwrap()
    }

    #[test]
    fn single_literal() {
        assert_eq!(post("a"), "a");
    }

    #[test]
    fn concatenation() {
        assert_eq!(post("ab"), "ab.");
        assert_eq!(post("abc"), "ab.c.");
    }

    #[test]
    fn alternation() {
        assert_eq!(post("a|b"), "ab|");
        assert_eq!(post("ab|cd"), "ab.cd.|");
    }

    #[test]
    fn star() {
        assert_eq!(post("a*"), "a*");
        assert_eq!(post("ab*c"), "ab*.c.");
    }

    #[test]
    fn grouping() {
        assert_eq!(post("a(b|c)*d"), "abc|*.d.");
    }

    #[test]
    fn rejects_unmatched_close_paren() {
        let err = to_postfix("a)").unwrap_err();
        assert!(matches!(
            err,
            Error::Regex {
                reason: UnmatchedParen,
                ..
            }
        ));
    }

    #[test]
    fn rejects_unclosed_paren() {
        let err = to_postfix("(a").unwrap_err();
        assert!(matches!(
            err,
            Error::Regex {
                reason: UnclosedParen,
                ..
            }
        ));
    }

    #[test]
    fn rejects_empty_group() {
        let err = to_postfix("()").unwrap_err();
        assert!(matches!(
            err,
            Error::Regex {
                reason: EmptyGroup,
                ..
            }
        ));
    }

    #[test]
    fn rejects_quantifier_without_atom() {
        for re in ["*", "(a)|*"] {
            let err = to_postfix(re).unwrap_err();
            assert!(matches!(
                err,
                Error::Regex {
                    reason: QuantifierWithoutAtom,
                    ..
                }
            ));
        }
    }

    #[test]
    fn rejects_misplaced_quantifier_and_plus_question_mark() {
        // `+`/`?` with nothing preceding them are reported as misplaced...
        for re in ["+", "?"] {
            let err = to_postfix(re).unwrap_err();
            assert!(matches!(
                err,
                Error::Regex {
                    reason: QuantifierWithoutAtom,
                    ..
                }
            ));
        }
        // ...but `+`/`?` are unconditionally rejected even with a preceding
        // atom, since their semantics are never implemented.
        for re in ["a+", "a?", "(a|b)+"] {
            let err = to_postfix(re).unwrap_err();
            assert!(matches!(
                err,
                Error::Regex {
                    reason: UnsupportedQuantifier,
                    ..
                }
            ));
        }
    }

    #[test]
    fn rejects_alternation_with_no_atoms() {
        let err = to_postfix("|a").unwrap_err();
        assert!(matches!(
            err,
            Error::Regex {
                reason: AlternationWithNoAtoms,
                ..
            }
        ));
    }

    #[test]
    fn rejects_empty_expression() {
        let err = to_postfix("").unwrap_err();
        assert!(matches!(
            err,
            Error::Regex {
                reason: EmptyExpression,
                ..
            }
        ));
    }

    #[test]
    fn rejects_deep_nesting() {
        let re = "(".repeat(MAX_NESTING) + "a" + &")".repeat(MAX_NESTING);
        assert!(to_postfix(&re).is_ok());
        let too_deep = "(".repeat(MAX_NESTING + 1) + "a" + &")".repeat(MAX_NESTING + 1);
        let err = to_postfix(&too_deep).unwrap_err();
        assert!(matches!(
            err,
            Error::Regex {
                reason: NestingTooDeep,
                ..
            }
        ));
    }
}
