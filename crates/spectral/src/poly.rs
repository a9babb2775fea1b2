use ndarray::{Array2, ArrayView2};
use num_bigint::BigInt;
use num_traits::{One, Signed, Zero};
use serde::{Serialize, Serializer};
use std::fmt;

use crate::eigen::SpectralError;

/// Integer polynomial with exact coefficients, ascending order of degree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Polynomial {
    #[serde(rename = "coefficients", serialize_with = "decimal_strings")]
    coeffs: Vec<BigInt>,
}

// JSON numbers lose precision past 2^53; coefficients go out as strings.
fn decimal_strings<S: Serializer>(
    coeffs: &[BigInt],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(coeffs.iter().map(|c| c.to_string()))
}

impl Polynomial {
    /// Trailing zero coefficients are dropped.
    pub fn from_coefficients<I, C>(coeffs: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<BigInt>,
    {
        let mut coeffs: Vec<BigInt> =
            coeffs.into_iter().map(Into::into).collect();
        while coeffs.last().is_some_and(Zero::is_zero) {
            coeffs.pop();
        }
        Self { coeffs }
    }

    /// The constant polynomial `1`.
    pub fn one() -> Self {
        Self {
            coeffs: vec![BigInt::one()],
        }
    }

    pub fn coefficients(&self) -> &[BigInt] {
        &self.coeffs
    }

    /// Degree, or `None` for the zero polynomial.
    pub fn degree(&self) -> Option<usize> {
        self.coeffs.len().checked_sub(1)
    }

    /// Exact value at an integer point (Horner).
    pub fn eval(&self, x: i64) -> BigInt {
        self.coeffs
            .iter()
            .rev()
            .fold(BigInt::zero(), |acc, c| acc * x + c)
    }

    pub fn is_root(&self, x: i64) -> bool {
        self.eval(x).is_zero()
    }
}

impl fmt::Display for Polynomial {
    /// Renders like `x^3 - 4*x^2 + 3*x`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (power, c) in self.coeffs.iter().enumerate().rev() {
            if c.is_zero() {
                continue;
            }
            if first {
                if c.is_negative() {
                    write!(f, "-")?;
                }
            } else {
                let sign = if c.is_negative() { "-" } else { "+" };
                write!(f, " {} ", sign)?;
            }
            first = false;

            let m = c.magnitude();
            match power {
                0 => write!(f, "{}", m)?,
                1 if m.is_one() => write!(f, "x")?,
                1 => write!(f, "{}*x", m)?,
                p if m.is_one() => write!(f, "x^{}", p)?,
                p => write!(f, "{}*x^{}", m, p)?,
            }
        }
        if first {
            write!(f, "0")?;
        }
        Ok(())
    }
}

/// Characteristic polynomial `det(xI - M)` of an integer matrix.
///
/// Faddeev–LeVerrier recurrence: with `M_0 = 0` and `c_n = 1`,
/// `M_k = A M_{k-1} + c_{n-k+1} I` and `c_{n-k} = -tr(A M_k) / k`.
/// For integer input every division is exact, and the arithmetic is done in
/// arbitrary precision, so the result is exact at any size.
pub fn char_poly(
    matrix: ArrayView2<'_, i64>,
) -> Result<Polynomial, SpectralError> {
    let (rows, cols) = matrix.dim();
    if rows != cols {
        return Err(SpectralError::NotSquare { rows, cols });
    }
    let n = rows;
    if n == 0 {
        return Ok(Polynomial::one());
    }

    let a: Array2<BigInt> = matrix.mapv(BigInt::from);
    let mut coeffs = vec![BigInt::zero(); n + 1];
    coeffs[n] = BigInt::one();

    // A * M_{k-1}; zero for k = 1
    let mut am = Array2::<BigInt>::zeros((n, n));
    for k in 1..=n {
        let mut m = am;
        for i in 0..n {
            m[[i, i]] += &coeffs[n - k + 1];
        }
        am = mat_mul(&a, &m);

        let trace: BigInt = am.diag().iter().sum();
        coeffs[n - k] = -(trace / BigInt::from(k));
    }

    Ok(Polynomial::from_coefficients(coeffs))
}

fn mat_mul(a: &Array2<BigInt>, b: &Array2<BigInt>) -> Array2<BigInt> {
    let n = a.nrows();
    Array2::from_shape_fn((n, n), |(i, j)| {
        (0..n)
            .filter(|&k| !a[[i, k]].is_zero())
            .map(|k| &a[[i, k]] * &b[[k, j]])
            .sum()
    })
}

/// Rewrite `^<digits>` exponents with superscript digits: `x^12` → `x¹²`.
///
/// A `^` not followed by a digit is kept as is. Nothing else is touched.
pub fn superscript_exponents(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '^' && chars.peek().is_some_and(|c| c.is_ascii_digit()) {
            while let Some(&d) = chars.peek() {
                match superscript_digit(d) {
                    Some(sup) => {
                        out.push(sup);
                        chars.next();
                    }
                    None => break,
                }
            }
        } else {
            out.push(ch);
        }
    }
    out
}

fn superscript_digit(d: char) -> Option<char> {
    let sup = match d {
        '0' => '⁰',
        '1' => '¹',
        '2' => '²',
        '3' => '³',
        '4' => '⁴',
        '5' => '⁵',
        '6' => '⁶',
        '7' => '⁷',
        '8' => '⁸',
        '9' => '⁹',
        _ => return None,
    };
    Some(sup)
}
