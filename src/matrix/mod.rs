//! Square-matrix arithmetic over the ring of integers modulo a fixed M,
//! plus the block packing the Hill cipher uses.
//!
//! M does not have to be prime (the Hill ring is 27 = 3^3), so everything
//! here sticks to ring operations: the determinant uses cofactor expansion
//! rather than Gaussian elimination, and the inverse exists exactly when
//! `gcd(det, M) == 1`.

pub mod alphabet;

use log::debug;
use num_integer::Integer;

use crate::arith;
use crate::error::Error;

/// A rows × cols grid of ring elements modulo a fixed `modulus >= 2`.
/// Every entry is kept normalized into `[0, modulus)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RingMatrix {
    modulus: u64,
    rows: usize,
    cols: usize,
    // row-major
    data: Vec<u64>,
}

impl RingMatrix {
    /// Builds a matrix from rows of (possibly negative) integers, reducing
    /// each entry into `[0, modulus)`.
    ///
    /// Panics on `modulus < 2`, empty input, or ragged rows; those are
    /// caller bugs, not runtime conditions.
    pub fn from_rows(rows: &[Vec<i64>], modulus: u64) -> Self {
        assert!(modulus >= 2, "ring modulus must be >= 2");
        assert!(!rows.is_empty(), "matrix needs at least one row");
        let cols = rows[0].len();
        assert!(cols > 0, "matrix needs at least one column");
        let mut data = Vec::with_capacity(rows.len() * cols);
        for row in rows {
            assert_eq!(row.len(), cols, "ragged rows");
            for &e in row {
                data.push((e as i128).rem_euclid(modulus as i128) as u64);
            }
        }
        Self {
            modulus,
            rows: rows.len(),
            cols,
            data,
        }
    }

    /// The n × n identity over the given ring.
    pub fn identity(n: usize, modulus: u64) -> Self {
        assert!(modulus >= 2, "ring modulus must be >= 2");
        assert!(n > 0, "identity needs n >= 1");
        let mut data = vec![0u64; n * n];
        for i in 0..n {
            data[i * n + i] = 1 % modulus;
        }
        Self {
            modulus,
            rows: n,
            cols: n,
            data,
        }
    }

    fn zeroed(rows: usize, cols: usize, modulus: u64) -> Self {
        Self {
            modulus,
            rows,
            cols,
            data: vec![0u64; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn modulus(&self) -> u64 {
        self.modulus
    }

    /// Entry at (row, col), already reduced into `[0, modulus)`.
    pub fn get(&self, row: usize, col: usize) -> u64 {
        assert!(row < self.rows && col < self.cols, "index out of bounds");
        self.data[row * self.cols + col]
    }

    fn set(&mut self, row: usize, col: usize, value: u64) {
        self.data[row * self.cols + col] = value % self.modulus;
    }

    /// The (row, col) minor: this matrix with one row and column removed.
    fn minor(&self, skip_row: usize, skip_col: usize) -> RingMatrix {
        let mut data = Vec::with_capacity((self.rows - 1) * (self.cols - 1));
        for r in 0..self.rows {
            if r == skip_row {
                continue;
            }
            for c in 0..self.cols {
                if c == skip_col {
                    continue;
                }
                data.push(self.data[r * self.cols + c]);
            }
        }
        Self {
            modulus: self.modulus,
            rows: self.rows - 1,
            cols: self.cols - 1,
            data,
        }
    }

    /// Determinant reduced into `[0, modulus)`.
    ///
    /// n = 1 and n = 2 use the closed forms; larger n uses Laplace
    /// expansion along the first row, which stays valid when the modulus is
    /// composite. Exponential in n, which is fine for cipher-sized keys.
    pub fn determinant(&self) -> u64 {
        assert_eq!(self.rows, self.cols, "determinant requires a square matrix");
        self.det_mod()
    }

    fn det_mod(&self) -> u64 {
        let m = self.modulus as i128;
        match self.rows {
            // det of the empty matrix, so 1x1 cofactors work out
            0 => (1 % m) as u64,
            1 => self.data[0],
            2 => {
                let [a, b, c, d] = [self.data[0], self.data[1], self.data[2], self.data[3]];
                (a as i128 * d as i128 - b as i128 * c as i128).rem_euclid(m) as u64
            }
            n => {
                let mut acc: i128 = 0;
                for j in 0..n {
                    let term = (self.data[j] as u128 * self.minor(0, j).det_mod() as u128
                        % self.modulus as u128) as i128;
                    if j % 2 == 0 {
                        acc += term;
                    } else {
                        acc -= term;
                    }
                }
                acc.rem_euclid(m) as u64
            }
        }
    }

    /// Whether this matrix has an inverse over its ring, i.e. whether the
    /// determinant is coprime to the modulus.
    pub fn is_invertible(&self) -> bool {
        self.determinant().gcd(&self.modulus) == 1
    }

    /// The modular inverse, via the adjugate scaled by `det^-1`.
    ///
    /// Fails with [`Error::SingularMatrix`] when the determinant is not
    /// coprime to the modulus. That is an invalid-key condition, fixed only
    /// by choosing a different matrix, never by retrying. On success both
    /// `K * K^-1` and `K^-1 * K` are the identity mod M.
    pub fn inverse(&self) -> Result<RingMatrix, Error> {
        assert_eq!(self.rows, self.cols, "inverse requires a square matrix");
        let det = self.determinant();
        if det.gcd(&self.modulus) != 1 {
            debug!(
                "rejecting singular matrix: det = {} mod {}",
                det, self.modulus
            );
            return Err(Error::SingularMatrix {
                determinant: det,
                modulus: self.modulus,
            });
        }
        let det_inv = arith::mod_inverse_u64(det, self.modulus)?;

        let n = self.rows;
        let mut inv = RingMatrix::zeroed(n, n, self.modulus);
        for i in 0..n {
            for j in 0..n {
                let cof = self.minor(i, j).det_mod();
                let signed = if (i + j) % 2 == 0 {
                    cof as i128
                } else {
                    -(cof as i128)
                };
                let cof = signed.rem_euclid(self.modulus as i128) as u64;
                // adjugate transposes the cofactor grid
                let entry = (cof as u128 * det_inv as u128 % self.modulus as u128) as u64;
                inv.set(j, i, entry);
            }
        }
        Ok(inv)
    }

    /// Matrix product with every entry reduced mod M. Requires matching
    /// moduli and `self.cols == other.rows`.
    pub fn multiply_mod(&self, other: &RingMatrix) -> Result<RingMatrix, Error> {
        if self.modulus != other.modulus {
            return Err(Error::ModulusMismatch {
                left: self.modulus,
                right: other.modulus,
            });
        }
        if self.cols != other.rows {
            return Err(Error::DimensionMismatch {
                left_rows: self.rows,
                left_cols: self.cols,
                right_rows: other.rows,
                right_cols: other.cols,
            });
        }
        let m = self.modulus as u128;
        let mut out = RingMatrix::zeroed(self.rows, other.cols, self.modulus);
        for i in 0..self.rows {
            for j in 0..other.cols {
                let mut acc: u128 = 0;
                for k in 0..self.cols {
                    acc = (acc + self.get(i, k) as u128 * other.get(k, j) as u128) % m;
                }
                out.set(i, j, acc as u64);
            }
        }
        Ok(out)
    }
}

/// Packs a symbol sequence into an n-row matrix of block columns.
///
/// The sequence is right-padded with `padding_symbol` up to the next
/// multiple of `n`, then filled column-major: column 0 takes the first n
/// symbols, column 1 the next n, and so on. The padding symbol is an
/// explicit caller choice (the Hill demos pad with
/// [`alphabet::PADDING`], the letter X). An empty sequence packs to a
/// single all-padding column.
pub fn pack_vector(symbols: &[u64], n: usize, padding_symbol: u64, modulus: u64) -> RingMatrix {
    assert!(n > 0, "block size must be >= 1");
    assert!(modulus >= 2, "ring modulus must be >= 2");
    let cols = ((symbols.len() + n - 1) / n).max(1);
    let mut out = RingMatrix::zeroed(n, cols, modulus);
    for idx in 0..n * cols {
        let symbol = symbols.get(idx).copied().unwrap_or(padding_symbol);
        out.set(idx % n, idx / n, symbol);
    }
    out
}

/// Inverse of [`pack_vector`]: flattens a matrix column-major into its
/// symbol sequence (padding included), entries reduced mod the ring size.
pub fn unpack_matrix(matrix: &RingMatrix) -> Vec<u64> {
    let mut out = Vec::with_capacity(matrix.rows * matrix.cols);
    for c in 0..matrix.cols {
        for r in 0..matrix.rows {
            out.push(matrix.get(r, c));
        }
    }
    out
}

#[test]
fn test_reference_determinant() {
    // det([[3,5],[7,2]]) = 6 - 35 = -29 = 25 mod 27
    let k = RingMatrix::from_rows(&[vec![3, 5], vec![7, 2]], 27);
    assert_eq!(k.determinant(), 25);
    assert!(k.is_invertible());
}

#[test]
fn test_negative_entries_normalize() {
    let k = RingMatrix::from_rows(&[vec![-1, -28], vec![0, 53]], 27);
    assert_eq!(k.get(0, 0), 26);
    assert_eq!(k.get(0, 1), 26);
    assert_eq!(k.get(1, 1), 26);
}

#[test]
fn test_multiples_of_three_not_invertible() {
    // gcd(d, 27) != 1 exactly when 3 | d
    for d in (0..27).step_by(3) {
        let k = RingMatrix::from_rows(&[vec![d, 0], vec![0, 1]], 27);
        assert_eq!(k.determinant(), d as u64);
        assert!(!k.is_invertible(), "det {} must not be invertible", d);
        let err = k.inverse().unwrap_err();
        assert_eq!(
            err,
            Error::SingularMatrix {
                determinant: d as u64,
                modulus: 27
            }
        );
    }
}

#[test]
fn test_inverse_roundtrip_2x2() {
    let k = RingMatrix::from_rows(&[vec![3, 5], vec![7, 2]], 27);
    let k_inv = k.inverse().unwrap();
    let id = RingMatrix::identity(2, 27);
    assert_eq!(k.multiply_mod(&k_inv).unwrap(), id);
    assert_eq!(k_inv.multiply_mod(&k).unwrap(), id);
}

#[test]
fn test_inverse_roundtrip_3x3() {
    // integer det = 1, so invertible over any ring
    let k = RingMatrix::from_rows(&[vec![1, 2, 3], vec![0, 1, 4], vec![5, 6, 0]], 27);
    assert_eq!(k.determinant(), 1);
    let k_inv = k.inverse().unwrap();
    let id = RingMatrix::identity(3, 27);
    assert_eq!(k.multiply_mod(&k_inv).unwrap(), id);
    assert_eq!(k_inv.multiply_mod(&k).unwrap(), id);
}

#[test]
fn test_determinant_general_n() {
    // upper triangular: det = product of the diagonal = 24
    let k = RingMatrix::from_rows(
        &[
            vec![2, 1, 0, 0],
            vec![0, 3, 0, 0],
            vec![0, 0, 1, 5],
            vec![0, 0, 0, 4],
        ],
        27,
    );
    assert_eq!(k.determinant(), 24);
}

#[test]
fn test_inverse_4x4_roundtrip() {
    let k = RingMatrix::from_rows(
        &[
            vec![2, 1, 0, 0],
            vec![0, 3, 0, 0],
            vec![0, 0, 1, 5],
            vec![0, 0, 0, 4],
        ],
        29,
    );
    let k_inv = k.inverse().unwrap();
    let id = RingMatrix::identity(4, 29);
    assert_eq!(k.multiply_mod(&k_inv).unwrap(), id);
    assert_eq!(k_inv.multiply_mod(&k).unwrap(), id);
}

#[test]
fn test_multiply_shape_errors() {
    let a = RingMatrix::from_rows(&[vec![1, 2]], 27);
    let b = RingMatrix::from_rows(&[vec![1, 2]], 27);
    assert!(matches!(
        a.multiply_mod(&b),
        Err(Error::DimensionMismatch { .. })
    ));
    let c = RingMatrix::from_rows(&[vec![1], vec![2]], 26);
    assert_eq!(
        a.multiply_mod(&c).unwrap_err(),
        Error::ModulusMismatch { left: 27, right: 26 }
    );
}

#[test]
fn test_pack_unpack_roundtrip_with_padding() {
    // 5 symbols into blocks of 2: one padding symbol appended, not prepended
    let symbols = [7u64, 15, 11, 0, 14];
    let packed = pack_vector(&symbols, 2, alphabet::PADDING, 27);
    assert_eq!(packed.rows(), 2);
    assert_eq!(packed.cols(), 3);
    assert_eq!(packed.get(0, 0), 7);
    assert_eq!(packed.get(1, 0), 15);
    assert_eq!(packed.get(1, 2), alphabet::PADDING);
    assert_eq!(unpack_matrix(&packed), vec![7, 15, 11, 0, 14, alphabet::PADDING]);
}

#[test]
fn test_pack_exact_multiple_adds_no_padding() {
    let symbols = [1u64, 2, 3, 4, 5, 6];
    let packed = pack_vector(&symbols, 3, alphabet::PADDING, 27);
    assert_eq!(packed.cols(), 2);
    assert_eq!(unpack_matrix(&packed), symbols.to_vec());
}
