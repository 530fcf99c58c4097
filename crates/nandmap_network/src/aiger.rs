//! Reader for the ASCII AIGER (`.aag`) and-inverter graph format.
//!
//! Only combinational graphs are accepted: the latch count must be zero and
//! the AIGER 1.9 extension sections (bad states, constraints, justice,
//! fairness) must be empty. The symbol table supplies input and output
//! names; the comment section ends parsing.
//!
//! ```text
//! aag 3 2 0 1 1
//! 2
//! 4
//! 7
//! 6 2 4
//! i0 a
//! i1 b
//! o0 out
//! ```

use crate::error::NetworkError;
use std::collections::HashMap;
use std::path::Path;

/// A parsed combinational and-inverter graph.
///
/// Literals follow AIGER conventions: `2 * var + complement`, with variable
/// 0 being constant false.
#[derive(Debug, Clone, Default)]
pub struct Aig {
    /// Largest variable index declared in the header.
    pub max_var: u32,
    /// Primary inputs in declaration order.
    pub inputs: Vec<AigInput>,
    /// Primary outputs in declaration order.
    pub outputs: Vec<AigOutput>,
    /// AND gates in file order.
    pub ands: Vec<AigAnd>,
}

/// A primary input declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AigInput {
    /// The (even) literal defined by this input.
    pub lit: u32,
    /// Name from the symbol table, if any.
    pub name: Option<String>,
    /// 1-based source line.
    pub line: u32,
}

/// A primary output declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AigOutput {
    /// The literal driving this output.
    pub lit: u32,
    /// Name from the symbol table, if any.
    pub name: Option<String>,
    /// 1-based source line.
    pub line: u32,
}

/// A two-input AND gate `lhs = rhs0 & rhs1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AigAnd {
    /// The (even) literal defined by this gate.
    pub lhs: u32,
    /// First fanin literal.
    pub rhs0: u32,
    /// Second fanin literal.
    pub rhs1: u32,
    /// 1-based source line.
    pub line: u32,
}

/// Returns the variable index of an AIGER literal.
pub fn var_of(lit: u32) -> u32 {
    lit >> 1
}

/// Returns `true` if an AIGER literal is complemented.
pub fn is_complemented(lit: u32) -> bool {
    lit & 1 == 1
}

/// Reads and parses an ASCII AIGER file.
pub fn load_aiger(path: &Path) -> Result<Aig, NetworkError> {
    let source = std::fs::read_to_string(path).map_err(|source| NetworkError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_aiger(&source)
}

/// Parses ASCII AIGER text.
pub fn parse_aiger(source: &str) -> Result<Aig, NetworkError> {
    let mut lines = source
        .lines()
        .enumerate()
        .map(|(index, text)| (index as u32 + 1, text));

    let (header_line, header) = lines.next().ok_or_else(|| NetworkError::Parse {
        line: 1,
        message: "empty netlist".to_string(),
    })?;
    let counts = parse_header(header, header_line)?;

    let mut aig = Aig {
        max_var: counts.max_var,
        ..Aig::default()
    };
    let mut defined: HashMap<u32, u32> = HashMap::new();

    for _ in 0..counts.inputs {
        let (line, text) = next_line(&mut lines, "input")?;
        let [lit] = parse_literals::<1>(text, line)?;
        check_definition(lit, line, counts.max_var, &mut defined)?;
        aig.inputs.push(AigInput {
            lit,
            name: None,
            line,
        });
    }

    for _ in 0..counts.outputs {
        let (line, text) = next_line(&mut lines, "output")?;
        let [lit] = parse_literals::<1>(text, line)?;
        check_range(lit, line, counts.max_var)?;
        aig.outputs.push(AigOutput {
            lit,
            name: None,
            line,
        });
    }

    for _ in 0..counts.ands {
        let (line, text) = next_line(&mut lines, "AND gate")?;
        let [lhs, rhs0, rhs1] = parse_literals::<3>(text, line)?;
        check_definition(lhs, line, counts.max_var, &mut defined)?;
        check_range(rhs0, line, counts.max_var)?;
        check_range(rhs1, line, counts.max_var)?;
        aig.ands.push(AigAnd {
            lhs,
            rhs0,
            rhs1,
            line,
        });
    }

    for (line, text) in lines {
        if text == "c" || text.starts_with("c ") {
            break;
        }
        if text.trim().is_empty() {
            continue;
        }
        parse_symbol(text, line, &mut aig)?;
    }

    check_uses(&aig, &defined)?;
    Ok(aig)
}

struct HeaderCounts {
    max_var: u32,
    inputs: u32,
    outputs: u32,
    ands: u32,
}

fn parse_header(text: &str, line: u32) -> Result<HeaderCounts, NetworkError> {
    let mut tokens = text.split_whitespace();
    match tokens.next() {
        Some("aag") => {}
        Some("aig") => {
            return Err(NetworkError::Unsupported {
                line,
                feature: "binary AIGER files",
            })
        }
        _ => {
            return Err(NetworkError::Parse {
                line,
                message: "expected an `aag` header".to_string(),
            })
        }
    }
    let numbers = tokens
        .map(|token| parse_number(token, line))
        .collect::<Result<Vec<_>, _>>()?;
    if numbers.len() < 5 {
        return Err(NetworkError::Parse {
            line,
            message: format!("header needs 5 counts (M I L O A), found {}", numbers.len()),
        });
    }
    if numbers[2] != 0 {
        return Err(NetworkError::Unsupported {
            line,
            feature: "latches",
        });
    }
    if numbers[5..].iter().any(|&n| n != 0) {
        return Err(NetworkError::Unsupported {
            line,
            feature: "bad-state, constraint, justice and fairness sections",
        });
    }
    let counts = HeaderCounts {
        max_var: numbers[0],
        inputs: numbers[1],
        outputs: numbers[3],
        ands: numbers[4],
    };
    if u64::from(counts.inputs) + u64::from(counts.ands) > u64::from(counts.max_var) {
        return Err(NetworkError::Parse {
            line,
            message: format!(
                "M = {} is smaller than I + A = {}",
                counts.max_var,
                u64::from(counts.inputs) + u64::from(counts.ands)
            ),
        });
    }
    Ok(counts)
}

fn next_line<'a>(
    lines: &mut impl Iterator<Item = (u32, &'a str)>,
    what: &str,
) -> Result<(u32, &'a str), NetworkError> {
    lines.next().ok_or_else(|| NetworkError::Parse {
        line: 0,
        message: format!("file ends before the last {what} line"),
    })
}

fn parse_number(token: &str, line: u32) -> Result<u32, NetworkError> {
    token.parse::<u32>().map_err(|_| NetworkError::Parse {
        line,
        message: format!("expected an unsigned integer, found `{token}`"),
    })
}

fn parse_literals<const N: usize>(text: &str, line: u32) -> Result<[u32; N], NetworkError> {
    let values = text
        .split_whitespace()
        .map(|token| parse_number(token, line))
        .collect::<Result<Vec<_>, _>>()?;
    values.try_into().map_err(|values: Vec<u32>| NetworkError::Parse {
        line,
        message: format!("expected {N} literal(s), found {}", values.len()),
    })
}

fn check_range(lit: u32, line: u32, max_var: u32) -> Result<(), NetworkError> {
    if var_of(lit) > max_var {
        return Err(NetworkError::Parse {
            line,
            message: format!("literal {lit} exceeds the maximum variable {max_var}"),
        });
    }
    Ok(())
}

fn check_definition(
    lit: u32,
    line: u32,
    max_var: u32,
    defined: &mut HashMap<u32, u32>,
) -> Result<(), NetworkError> {
    check_range(lit, line, max_var)?;
    if is_complemented(lit) || lit < 2 {
        return Err(NetworkError::Parse {
            line,
            message: format!("literal {lit} cannot be defined (must be even and at least 2)"),
        });
    }
    if let Some(previous) = defined.insert(var_of(lit), line) {
        return Err(NetworkError::Parse {
            line,
            message: format!(
                "variable {} is already defined on line {previous}",
                var_of(lit)
            ),
        });
    }
    Ok(())
}

fn check_uses(aig: &Aig, defined: &HashMap<u32, u32>) -> Result<(), NetworkError> {
    let uses = aig
        .outputs
        .iter()
        .map(|o| (o.lit, o.line))
        .chain(aig.ands.iter().flat_map(|a| [(a.rhs0, a.line), (a.rhs1, a.line)]));
    for (lit, line) in uses {
        let var = var_of(lit);
        if var != 0 && !defined.contains_key(&var) {
            return Err(NetworkError::UndefinedVariable { line, var });
        }
    }
    Ok(())
}

fn parse_symbol(text: &str, line: u32, aig: &mut Aig) -> Result<(), NetworkError> {
    let malformed = || NetworkError::Parse {
        line,
        message: format!("malformed symbol table entry `{text}`"),
    };
    let (position, name) = text.split_once(' ').ok_or_else(malformed)?;
    let mut chars = position.chars();
    let kind = chars.next().ok_or_else(malformed)?;
    let index: usize = chars.as_str().parse().map_err(|_| malformed())?;
    let slot = match kind {
        'i' => aig.inputs.get_mut(index).map(|input| &mut input.name),
        'o' => aig.outputs.get_mut(index).map(|output| &mut output.name),
        'l' | 'b' | 'c' | 'j' | 'f' => {
            return Err(NetworkError::Unsupported {
                line,
                feature: "sequential symbol entries",
            })
        }
        _ => return Err(malformed()),
    };
    let slot = slot.ok_or_else(|| NetworkError::Parse {
        line,
        message: format!("symbol `{position}` refers to a missing port"),
    })?;
    *slot = Some(name.to_string());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const HALF_NAND: &str = "aag 3 2 0 1 1\n2\n4\n7\n6 2 4\ni0 a\ni1 b\no0 out\nc\nanything here\n";

    #[test]
    fn parse_small_graph() {
        let aig = parse_aiger(HALF_NAND).unwrap();
        assert_eq!(aig.max_var, 3);
        assert_eq!(aig.inputs.len(), 2);
        assert_eq!(aig.inputs[0].name.as_deref(), Some("a"));
        assert_eq!(aig.outputs[0].lit, 7);
        assert_eq!(aig.outputs[0].name.as_deref(), Some("out"));
        assert_eq!(
            aig.ands[0],
            AigAnd {
                lhs: 6,
                rhs0: 2,
                rhs1: 4,
                line: 5
            }
        );
    }

    #[test]
    fn literal_helpers() {
        assert_eq!(var_of(7), 3);
        assert!(is_complemented(7));
        assert!(!is_complemented(6));
    }

    #[test]
    fn names_are_optional() {
        let aig = parse_aiger("aag 1 1 0 1 0\n2\n3\n").unwrap();
        assert!(aig.inputs[0].name.is_none());
        assert!(aig.outputs[0].name.is_none());
    }

    #[test]
    fn binary_header_rejected() {
        let err = parse_aiger("aig 1 1 0 1 0\n").unwrap_err();
        assert!(matches!(err, NetworkError::Unsupported { line: 1, .. }));
    }

    #[test]
    fn latches_rejected() {
        let err = parse_aiger("aag 2 1 1 1 0\n2\n4 2\n4\n").unwrap_err();
        assert!(matches!(err, NetworkError::Unsupported { feature: "latches", .. }));
    }

    #[test]
    fn extension_sections_rejected() {
        let err = parse_aiger("aag 1 1 0 1 0 1\n2\n2\n").unwrap_err();
        assert!(matches!(err, NetworkError::Unsupported { .. }));
        assert!(parse_aiger("aag 1 1 0 1 0 0 0\n2\n2\n").is_ok());
    }

    #[test]
    fn truncated_file_rejected() {
        let err = parse_aiger("aag 3 2 0 1 1\n2\n4\n7\n").unwrap_err();
        assert!(err.to_string().contains("AND gate"));
    }

    #[test]
    fn bad_header_rejected() {
        assert!(parse_aiger("").is_err());
        assert!(parse_aiger("blif\n").is_err());
        assert!(parse_aiger("aag 1 1 0\n").is_err());
        assert!(parse_aiger("aag 1 1 0 1 1\n2\n2\n4 2 2\n").is_err());
    }

    #[test]
    fn redefinition_rejected() {
        let err = parse_aiger("aag 2 1 0 1 1\n2\n2\n2 2 2\n").unwrap_err();
        assert!(err.to_string().contains("already defined on line 2"));
    }

    #[test]
    fn odd_definition_rejected() {
        let err = parse_aiger("aag 1 1 0 1 0\n3\n3\n").unwrap_err();
        assert!(matches!(err, NetworkError::Parse { line: 2, .. }));
    }

    #[test]
    fn undefined_variable_rejected() {
        let err = parse_aiger("aag 3 1 0 1 1\n2\n6\n6 2 4\n").unwrap_err();
        assert!(matches!(err, NetworkError::UndefinedVariable { line: 4, var: 2 }));
    }

    #[test]
    fn out_of_range_literal_rejected() {
        let err = parse_aiger("aag 1 1 0 1 0\n2\n9\n").unwrap_err();
        assert!(matches!(err, NetworkError::Parse { line: 3, .. }));
    }

    #[test]
    fn symbol_for_missing_port_rejected() {
        let err = parse_aiger("aag 1 1 0 1 0\n2\n2\ni4 x\n").unwrap_err();
        assert!(err.to_string().contains("missing port"));
    }

    #[test]
    fn load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_aiger(&dir.path().join("none.aag")).unwrap_err();
        assert!(matches!(err, NetworkError::Io { .. }));
    }
}
