//! Speed controls.
//!
//! The hiker's speed is never clamped. The free camera's is always
//! kept within [`CameraSpeed::MIN`]..=[`CameraSpeed::MAX`].

/// Walking speed in local units per second. Unbounded.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct HikerSpeed(f32);

impl Default for HikerSpeed {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl HikerSpeed {
    pub const DEFAULT: f32 = 5.0;

    /// Multiplier applied by [`HikerSpeed::faster`].
    pub const STEP_UP: f32 = 1.1;

    /// Multiplier applied by [`HikerSpeed::slower`].
    pub const STEP_DOWN: f32 = 0.9;

    pub fn new(speed: f32) -> Self {
        Self(speed)
    }

    pub fn get(self) -> f32 {
        self.0
    }

    pub fn set(&mut self, speed: f32) {
        self.0 = speed;
    }

    pub fn faster(&mut self) {
        self.0 *= Self::STEP_UP;
    }

    pub fn slower(&mut self) {
        self.0 *= Self::STEP_DOWN;
    }
}

/// Free camera movement speed in local units per second, clamped to
/// `[MIN, MAX]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct CameraSpeed(f32);

impl Default for CameraSpeed {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl CameraSpeed {
    pub const MIN: f32 = 10.0;
    pub const MAX: f32 = 500.0;
    pub const DEFAULT: f32 = 100.0;

    pub fn new(speed: f32) -> Self {
        let mut this = Self::default();
        this.set(speed);
        this
    }

    pub fn get(self) -> f32 {
        self.0
    }

    /// Sets the speed, clamped to `[MIN, MAX]`. NaN leaves the speed
    /// unchanged.
    pub fn set(&mut self, speed: f32) {
        if !speed.is_nan() {
            self.0 = speed.clamp(Self::MIN, Self::MAX);
        }
    }

    /// Scales the speed by `factor`, clamped to `[MIN, MAX]`.
    pub fn adjust(&mut self, factor: f32) {
        self.set(self.0 * factor);
    }
}
