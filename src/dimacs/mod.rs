//! DIMACS STP graph-file parser.
//!
//! The format (spec.md §6) is a small, line-oriented, sectioned text format,
//! not a flat edge list, so this follows a plain `BufRead::lines()` state
//! machine rather than `neo4j-labs-graph`'s `mmap` + chunked-parallel-parse
//! approach for its edge lists (`src/input/edgelist.rs`) — that technique
//! pays off on graphs so large the read itself is the bottleneck, which a
//! handful of DIMACS control lines never are.

use std::io::BufRead;

use log::debug;

use crate::SteinerError;

/// A parsed DIMACS STP instance: 0-based vertex ids, one entry per
/// undirected edge, and the terminal list in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DimacsGraph {
    pub n: usize,
    pub edges: Vec<(u32, u32, i64)>,
    pub terminals: Vec<u32>,
    pub known_cost: Option<i64>,
}

#[derive(PartialEq, Eq)]
enum Section {
    None,
    Comment,
    Graph,
    Terminals,
    Coordinates,
}

/// Parses a DIMACS STP document from any line source (a file, stdin, or an
/// in-memory string via `str::as_bytes`).
pub fn parse<R: BufRead>(reader: R) -> crate::Result<DimacsGraph> {
    let mut section = Section::None;
    let mut declared_n: Option<usize> = None;
    let mut declared_m: Option<usize> = None;
    let mut declared_k: Option<usize> = None;
    let mut edges = Vec::new();
    let mut terminals = Vec::new();
    let mut known_cost = None;

    for (line_no, line) in reader.lines().enumerate() {
        let line_no = line_no + 1;
        let line = line.map_err(|e| SteinerError::Parse {
            line: line_no,
            message: e.to_string(),
        })?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let mut tokens = line.split_whitespace();
        let keyword = tokens.next().unwrap_or("").to_ascii_lowercase();

        match keyword.as_str() {
            "33d32945" => {
                // The fixed magic header line every real SteinerLib .stp file
                // opens with; not a section keyword, just a format marker.
            }
            "section" => {
                let name = tokens.next().unwrap_or("").to_ascii_lowercase();
                section = match name.as_str() {
                    "comment" => Section::Comment,
                    "graph" => Section::Graph,
                    "terminals" => Section::Terminals,
                    "coordinates" => Section::Coordinates,
                    other => {
                        return Err(SteinerError::Parse {
                            line: line_no,
                            message: format!("unknown section '{other}'"),
                        })
                    }
                };
            }
            "end" => section = Section::None,
            "eof" => break,
            "nodes" if section == Section::Graph => {
                declared_n = Some(parse_count(&mut tokens, line_no)?);
            }
            "edges" if section == Section::Graph => {
                declared_m = Some(parse_count(&mut tokens, line_no)?);
            }
            "e" if section == Section::Graph => {
                let u = parse_vertex(&mut tokens, line_no)?;
                let v = parse_vertex(&mut tokens, line_no)?;
                let w = parse_weight(&mut tokens, line_no)?;
                edges.push((u - 1, v - 1, w));
            }
            "terminals" if section == Section::Terminals => {
                declared_k = Some(parse_count(&mut tokens, line_no)?);
            }
            "t" if section == Section::Terminals => {
                let t = parse_vertex(&mut tokens, line_no)?;
                terminals.push(t - 1);
            }
            "dd" if section == Section::Coordinates => {
                // Coordinates are ignored (spec.md §6).
            }
            "cost" => {
                let c: i64 = tokens.next().and_then(|s| s.parse().ok()).ok_or_else(|| {
                    SteinerError::Parse {
                        line: line_no,
                        message: "malformed cost line".to_string(),
                    }
                })?;
                known_cost = Some(c);
            }
            _ if section == Section::Comment => {
                // Free-form text inside `section comment ... end` is ignored.
            }
            other => {
                return Err(SteinerError::Parse {
                    line: line_no,
                    message: format!("unrecognised line starting with '{other}'"),
                })
            }
        }
    }

    let n = declared_n.ok_or_else(|| SteinerError::Parse {
        line: 0,
        message: "missing 'nodes' declaration".to_string(),
    })?;

    if let Some(m) = declared_m {
        if m != edges.len() {
            return Err(SteinerError::Parse {
                line: 0,
                message: format!("declared {m} edges, found {}", edges.len()),
            });
        }
    }
    if let Some(k) = declared_k {
        if k != terminals.len() {
            return Err(SteinerError::Parse {
                line: 0,
                message: format!("declared {k} terminals, found {}", terminals.len()),
            });
        }
    }

    for &(u, v, _) in &edges {
        if u as usize >= n || v as usize >= n {
            return Err(SteinerError::VertexOutOfRange {
                vertex: u.max(v),
                n: n as u32,
            });
        }
    }
    for &t in &terminals {
        if t as usize >= n {
            return Err(SteinerError::VertexOutOfRange { vertex: t, n: n as u32 });
        }
    }

    debug!(
        "parsed DIMACS instance: n={}, m={}, k={}",
        n,
        edges.len(),
        terminals.len()
    );

    Ok(DimacsGraph {
        n,
        edges,
        terminals,
        known_cost,
    })
}

fn parse_count(tokens: &mut std::str::SplitWhitespace<'_>, line_no: usize) -> crate::Result<usize> {
    tokens
        .next()
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| SteinerError::Parse {
            line: line_no,
            message: "expected an integer count".to_string(),
        })
}

fn parse_vertex(tokens: &mut std::str::SplitWhitespace<'_>, line_no: usize) -> crate::Result<u32> {
    let id: u32 = tokens
        .next()
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| SteinerError::Parse {
            line: line_no,
            message: "expected a 1-based vertex id".to_string(),
        })?;
    if id == 0 {
        return Err(SteinerError::Parse {
            line: line_no,
            message: "vertex ids are 1-based; 0 is not valid".to_string(),
        });
    }
    Ok(id)
}

fn parse_weight(tokens: &mut std::str::SplitWhitespace<'_>, line_no: usize) -> crate::Result<i64> {
    tokens
        .next()
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| SteinerError::Parse {
            line: line_no,
            message: "expected an integer edge weight".to_string(),
        })
}
