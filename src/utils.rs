use std::{
    fmt,
    ops::{Add, Div, Mul, Rem, Sub},
};

/// integer position on the grid, used for cells as well as chunk indices.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Default)]
pub struct Pos {
    pub x: i64,
    pub y: i64,
}

#[macro_export]
macro_rules! pos {
    ($x:expr, $y:expr) => {
        $crate::Pos::new($x, $y)
    };
}

impl Pos {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    pub fn as_vec2(self) -> Vec2 {
        Vec2::new(self.x as f64, self.y as f64)
    }
}

impl Add for Pos {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        pos!(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Pos {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        pos!(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<i64> for Pos {
    type Output = Self;
    fn mul(self, rhs: i64) -> Self::Output {
        pos!(self.x * rhs, self.y * rhs)
    }
}

/// floor division, so that `-1 / 64 == -1`.
impl Div<i64> for Pos {
    type Output = Self;
    fn div(self, rhs: i64) -> Self::Output {
        pos!(self.x.div_euclid(rhs), self.y.div_euclid(rhs))
    }
}

/// euclidean remainder, never negative for a positive divisor.
impl Rem<i64> for Pos {
    type Output = Self;
    fn rem(self, rhs: i64) -> Self::Output {
        pos!(self.x.rem_euclid(rhs), self.y.rem_euclid(rhs))
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// real valued vector for screen / pixel space.
#[derive(Debug, PartialEq, Clone, Copy, Default)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn floor(self) -> Pos {
        pos!(self.x.floor() as i64, self.y.floor() as i64)
    }

    pub fn ceil(self) -> Pos {
        pos!(self.x.ceil() as i64, self.y.ceil() as i64)
    }
}

impl From<Pos> for Vec2 {
    fn from(pos: Pos) -> Self {
        pos.as_vec2()
    }
}

impl Add for Vec2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self::Output {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f64> for Vec2 {
    type Output = Self;
    fn div(self, rhs: f64) -> Self::Output {
        Vec2::new(self.x / rhs, self.y / rhs)
    }
}

impl fmt::Display for Vec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
