//! Bracketed text form of arrays: `[[1,2,3],[4,5,6]]`.
//!
//! `Display` is shared by [`Array`], [`ArrayView`] and [`LazyArray`] and
//! forwards the formatter to each element, so `{:.3}` applies elementwise.
//! `FromStr` on [`Array`] reads the same form back.

use std::fmt::{self, Display, Write as _};
use std::str::FromStr;

use fixnd_traits::Shape;

use crate::array::Array;
use crate::lazy::{Expr, LazyArray};
use crate::view::ArrayView;
use crate::{ArrayError, Result};

fn write_axis<F, const R: usize>(
    f: &mut fmt::Formatter<'_>,
    sizes: &[usize; R],
    index: &mut [usize; R],
    axis: usize,
    elem: &mut F,
) -> fmt::Result
where
    F: FnMut(&mut fmt::Formatter<'_>, [usize; R]) -> fmt::Result,
{
    f.write_char('[')?;
    for i in 0..sizes[axis] {
        if i > 0 {
            f.write_char(',')?;
        }
        index[axis] = i;
        if axis + 1 == R {
            elem(f, *index)?;
        } else {
            write_axis(f, sizes, index, axis + 1, elem)?;
        }
    }
    f.write_char(']')
}

fn write_nested<F, const R: usize>(
    f: &mut fmt::Formatter<'_>,
    sizes: [usize; R],
    mut elem: F,
) -> fmt::Result
where
    F: FnMut(&mut fmt::Formatter<'_>, [usize; R]) -> fmt::Result,
{
    if R == 0 {
        return elem(f, [0; R]);
    }
    write_axis(f, &sizes, &mut [0; R], 0, &mut elem)
}

impl<T, S, const R: usize> Display for Array<T, S>
where
    T: Display,
    S: Shape<Index = [usize; R]>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_nested(f, S::sizes(), |f, k| Display::fmt(&self[k], f))
    }
}

impl<T: Display, const R: usize> Display for ArrayView<'_, T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_nested(f, self.sizes(), |f, k| Display::fmt(self.at(&k), f))
    }
}

impl<E, const R: usize> Display for LazyArray<E, R>
where
    E: Expr<R>,
    E::Item: Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_nested(f, self.sizes(), |f, k| Display::fmt(&self.eval(k), f))
    }
}

struct Parser<'s> {
    src: &'s str,
    pos: usize,
}

impl<'s> Parser<'s> {
    fn skip_ws(&mut self) {
        let rest = &self.src[self.pos..];
        self.pos += rest.len() - rest.trim_start().len();
    }

    fn peek(&mut self) -> Option<char> {
        self.skip_ws();
        self.src[self.pos..].chars().next()
    }

    fn expect(&mut self, c: char) -> Result<()> {
        match self.peek() {
            Some(got) if got == c => {
                self.pos += c.len_utf8();
                Ok(())
            }
            Some(got) => Err(ArrayError::Parse(format!(
                "expected '{c}' at byte {}, found '{got}'",
                self.pos
            ))),
            None => Err(ArrayError::Parse(format!("expected '{c}', found end of input"))),
        }
    }

    /// Text of one element: everything up to the next `,` or `]` outside
    /// parentheses.
    fn element(&mut self) -> Result<&'s str> {
        self.skip_ws();
        let rest = &self.src[self.pos..];
        let mut depth = 0usize;
        let mut end = rest.len();
        for (i, c) in rest.char_indices() {
            match c {
                '(' => depth += 1,
                ')' => depth = depth.saturating_sub(1),
                ',' | ']' if depth == 0 => {
                    end = i;
                    break;
                }
                _ => {}
            }
        }
        let text = rest[..end].trim_end();
        if text.is_empty() {
            return Err(ArrayError::Parse(format!("empty element at byte {}", self.pos)));
        }
        self.pos += end;
        Ok(text)
    }

    fn axis<T: FromStr>(&mut self, sizes: &[usize], depth: usize, out: &mut Vec<T>) -> Result<()> {
        let rank = sizes.len();
        self.expect('[')?;
        let mut count = 0;
        if self.peek() != Some(']') {
            loop {
                if depth + 1 == rank {
                    if self.peek() == Some('[') {
                        return Err(ArrayError::RankMismatch(rank, depth + 2));
                    }
                    let text = self.element()?;
                    let value = text
                        .parse()
                        .map_err(|_| ArrayError::Parse(format!("invalid element {text:?}")))?;
                    out.push(value);
                } else {
                    if self.peek() != Some('[') {
                        return Err(ArrayError::RankMismatch(rank, depth + 1));
                    }
                    self.axis(sizes, depth + 1, out)?;
                }
                count += 1;
                if self.peek() == Some(',') {
                    self.pos += 1;
                } else {
                    break;
                }
            }
        }
        self.expect(']')?;
        if count != sizes[depth] {
            return Err(ArrayError::LengthMismatch {
                expected: sizes[depth],
                got: count,
            });
        }
        Ok(())
    }
}

impl<T, S, const R: usize> FromStr for Array<T, S>
where
    T: FromStr,
    S: Shape<Index = [usize; R]>,
{
    type Err = ArrayError;

    /// Parse the bracketed form written by `Display`.
    ///
    /// # Errors
    /// [`ArrayError::RankMismatch`] for the wrong nesting depth,
    /// [`ArrayError::LengthMismatch`] for a wrong number of entries along
    /// an axis, [`ArrayError::Parse`] for anything else.
    fn from_str(s: &str) -> Result<Self> {
        let sizes = S::sizes();
        let mut data = Vec::with_capacity(S::LEN);
        let mut parser = Parser { src: s, pos: 0 };
        parser.axis(&sizes, 0, &mut data)?;
        if parser.peek().is_some() {
            return Err(ArrayError::Parse(format!(
                "trailing characters at byte {}",
                parser.pos
            )));
        }
        Ok(Array::from_vec_unchecked(data))
    }
}
