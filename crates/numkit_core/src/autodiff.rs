use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub, SubAssign};

/// Simple Dual Number for Forward Mode AD
/// val: real part
/// eps: infinitesimal part
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Dual {
    pub val: f64,
    pub eps: f64,
}

impl Dual {
    pub fn new(val: f64, eps: f64) -> Self {
        Self { val, eps }
    }

    /// A constant: zero derivative.
    pub fn constant(val: f64) -> Self {
        Self::new(val, 0.0)
    }

    /// The independent variable: unit derivative.
    pub fn variable(val: f64) -> Self {
        Self::new(val, 1.0)
    }

    pub fn abs(self) -> Self {
        if self.val < 0.0 {
            -self
        } else {
            self
        }
    }

    pub fn powi(self, n: i32) -> Self {
        if n == 0 {
            return Self::constant(1.0);
        }
        let pow_n_1 = self.val.powi(n - 1);
        Self::new(pow_n_1 * self.val, n as f64 * pow_n_1 * self.eps)
    }

    pub fn powf(self, n: f64) -> Self {
        let pow_n_1 = self.val.powf(n - 1.0);
        Self::new(pow_n_1 * self.val, n * pow_n_1 * self.eps)
    }

    pub fn sqrt(self) -> Self {
        let s = self.val.sqrt();
        Self::new(s, self.eps / (2.0 * s))
    }

    pub fn exp(self) -> Self {
        let e = self.val.exp();
        Self::new(e, self.eps * e)
    }

    pub fn ln(self) -> Self {
        Self::new(self.val.ln(), self.eps / self.val)
    }

    pub fn sin(self) -> Self {
        Self::new(self.val.sin(), self.eps * self.val.cos())
    }

    pub fn cos(self) -> Self {
        Self::new(self.val.cos(), -self.eps * self.val.sin())
    }

    pub fn tan(self) -> Self {
        let t = self.val.tan();
        Self::new(t, self.eps * (1.0 + t * t))
    }
}

impl From<f64> for Dual {
    fn from(val: f64) -> Self {
        Self::constant(val)
    }
}

impl Add for Dual {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.val + rhs.val, self.eps + rhs.eps)
    }
}

impl Sub for Dual {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.val - rhs.val, self.eps - rhs.eps)
    }
}

impl Mul for Dual {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        Self::new(self.val * rhs.val, self.val * rhs.eps + self.eps * rhs.val)
    }
}

impl Div for Dual {
    type Output = Self;
    fn div(self, rhs: Self) -> Self {
        let denom = rhs.val * rhs.val;
        Self::new(
            self.val / rhs.val,
            (self.eps * rhs.val - self.val * rhs.eps) / denom,
        )
    }
}

impl Neg for Dual {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.val, -self.eps)
    }
}

impl AddAssign for Dual {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for Dual {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl MulAssign for Dual {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

// Mixed arithmetic with plain constants, in both operand orders.
macro_rules! impl_f64_ops {
    ($($trait:ident :: $method:ident),*) => {
        $(
            impl $trait<f64> for Dual {
                type Output = Dual;
                fn $method(self, rhs: f64) -> Dual {
                    $trait::$method(self, Dual::constant(rhs))
                }
            }

            impl $trait<Dual> for f64 {
                type Output = Dual;
                fn $method(self, rhs: Dual) -> Dual {
                    $trait::$method(Dual::constant(self), rhs)
                }
            }
        )*
    };
}

impl_f64_ops!(Add::add, Sub::sub, Mul::mul, Div::div);

/// Evaluates `f` and its derivative at `x` in a single forward pass.
pub fn derivative<F>(f: F, x: f64) -> (f64, f64)
where
    F: FnOnce(Dual) -> Dual,
{
    let out = f(Dual::variable(x));
    (out.val, out.eps)
}
