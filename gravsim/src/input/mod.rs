//! Interactive collection of initial conditions
//!
//! A linear prompt sequence: the body count, then seven reals per body in
//! the order `mass, x, y, vx, vy, ax, ay`. Values are read as
//! whitespace-separated tokens, so they may span or share lines freely.

use std::io::{BufRead, Write};

use crate::configuration::config::BodyConfig;
use crate::error::{SimError, SimResult};

/// Pulls whitespace-separated tokens out of a line-oriented reader
pub struct Tokens<R: BufRead> {
    reader: R,
    pending: Vec<String>, // reversed, next token at the end
}

impl<R: BufRead> Tokens<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: Vec::new(),
        }
    }

    /// Next token, or `None` at end of input
    pub fn next_token(&mut self) -> SimResult<Option<String>> {
        while self.pending.is_empty() {
            let mut line = String::new();
            if self.reader.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            self.pending = line.split_whitespace().rev().map(str::to_owned).collect();
        }
        Ok(self.pending.pop())
    }

    fn parse_next<T: std::str::FromStr>(&mut self, what: &str) -> SimResult<T>
    where
        T::Err: std::fmt::Display,
    {
        let token = self
            .next_token()?
            .ok_or_else(|| SimError::Input(format!("unexpected end of input while reading {what}")))?;
        token
            .parse::<T>()
            .map_err(|e| SimError::Input(format!("invalid {what} `{token}`: {e}")))
    }
}

/// Prompt on `out` and read the body set from `input`
pub fn prompt_bodies<R: BufRead, W: Write>(input: R, out: &mut W) -> SimResult<Vec<BodyConfig>> {
    let mut tokens = Tokens::new(input);

    write!(out, "Enter the number of bodies: ")?;
    out.flush()?;
    let n: usize = tokens.parse_next("number of bodies")?;
    if n == 0 {
        return Err(SimError::Input("the number of bodies must be at least 1".to_string()));
    }

    let mut bodies = Vec::with_capacity(n);
    for k in 1..=n {
        write!(out, "Enter mass, x, y, vx, vy, ax, ay for body {k}: ")?;
        out.flush()?;

        let mut vals = [0.0_f64; 7];
        for (slot, name) in vals.iter_mut().zip(["mass", "x", "y", "vx", "vy", "ax", "ay"]) {
            *slot = tokens.parse_next(&format!("{name} of body {k}"))?;
        }
        let [m, x, y, vx, vy, ax, ay] = vals;
        if !m.is_finite() || m <= 0.0 {
            return Err(SimError::Input(format!("mass of body {k} must be positive, got {m}")));
        }

        bodies.push(BodyConfig {
            m,
            x: [x, y],
            v: [vx, vy],
            a: [ax, ay],
        });
    }

    Ok(bodies)
}
