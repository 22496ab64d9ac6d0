//! Simulation constants and defaults

/// Minimum timestep for adaptive solvers
pub const SIM_TIMESTEP_MIN: f64 = 1e-12;

/// Maximum sub-steps the adaptive loop may take between two output samples
pub const SIM_SUBSTEPS_MAX: usize = 500;

/// Relative slack when deciding that an output time has been reached
pub const SIM_TIME_EPSILON: f64 = 1e-12;

/// Relative tolerance used to decide whether a time grid is uniform
pub const GRID_UNIFORM_TOLERANCE: f64 = 1e-9;

/// Minimum scale factor for timestep adjustment
pub const SOL_SCALE_MIN: f64 = 0.1;

/// Maximum scale factor for timestep adjustment
pub const SOL_SCALE_MAX: f64 = 10.0;

/// Safety factor for adaptive error control
pub const SOL_BETA: f64 = 0.9;

/// Lower bound of the scaled error norm
pub const SOL_ERROR_FLOOR: f64 = 1e-16;

/// Default absolute tolerance for local truncation error (dopri5)
pub const SOL_TOLERANCE_LTE_ABS: f64 = 1e-12;

/// Default relative tolerance for local truncation error (dopri5)
pub const SOL_TOLERANCE_LTE_REL: f64 = 1e-6;

/// Absolute and relative tolerance of the LSODA-style whole-span integration
pub const SOL_TOLERANCE_LSODA: f64 = 1.49012e-8;

// Driven pendulum run

/// Start of the pendulum integration window
pub const PENDULUM_T_START: f64 = 0.0;

/// End of the pendulum integration window
pub const PENDULUM_T_STOP: f64 = 250.0;

/// Number of fixed output steps for the pendulum
pub const PENDULUM_STEPS: usize = 2000;

/// Damping coefficient gamma
pub const PENDULUM_DAMPING: f64 = 0.25;

/// Driving angular frequency omega_d
pub const PENDULUM_DRIVE_FREQUENCY: f64 = 2.0 / 3.0;

/// Lower bound of the driving amplitude slider
pub const PENDULUM_AMPLITUDE_MIN: f64 = 0.0;

/// Upper bound of the driving amplitude slider
pub const PENDULUM_AMPLITUDE_MAX: f64 = 2.5;

/// Initial driving amplitude
pub const PENDULUM_AMPLITUDE_DEFAULT: f64 = 0.5;

// Double-well run

/// Well shape parameter `a` of V(x) = x^4 - 2a^2 x^2
pub const WELL_SHAPE: f64 = 2.0;

/// Start of the double-well sample window
pub const WELL_T_START: f64 = 0.0;

/// End of the double-well sample window (inclusive)
pub const WELL_T_STOP: f64 = 20.0;

/// Number of double-well samples
pub const WELL_SAMPLES: usize = 10_000;

/// Upper bound of the energy slider
pub const WELL_ENERGY_MAX: f64 = 200.0;

/// Default energy as a fraction of the potential floor -a^4
pub const WELL_ENERGY_DEFAULT_FRACTION: f64 = 0.95;

/// Extent of the sampled potential curve
pub const WELL_CURVE_X_MIN: f64 = -3.0;

/// Extent of the sampled potential curve
pub const WELL_CURVE_X_MAX: f64 = 3.0;

/// Number of points of the sampled potential curve
pub const WELL_CURVE_POINTS: usize = 5000;
