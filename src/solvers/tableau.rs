//! Butcher tableaus of the explicit Runge-Kutta methods

/// Coefficients of an explicit Runge-Kutta method
///
/// `a[i]` holds the weights that build the trial state of stage `i + 1`, so
/// an `s`-stage method has `s - 1` rows. `error` is the difference between the
/// propagating and the embedded weights; methods without an embedded pair
/// run at fixed step.
#[derive(Debug)]
pub struct Tableau {
    pub name: &'static str,
    pub c: &'static [f64],
    pub a: &'static [&'static [f64]],
    pub b: &'static [f64],
    pub error: Option<&'static [f64]>,
    /// Order of the propagated solution
    pub order: usize,
    /// Order that drives the step-size exponent, `min(p, p̂)`
    pub error_order: usize,
}

impl Tableau {
    pub fn stages(&self) -> usize {
        self.c.len()
    }

    pub fn is_adaptive(&self) -> bool {
        self.error.is_some()
    }
}

/// Dormand-Prince 5(4), the method behind scipy's `dopri5` and MATLAB's `ode45`
///
/// FSAL: the last stage is evaluated at the propagated solution.
///
/// Dormand, J. R., & Prince, P. J. (1980). "A family of embedded Runge-Kutta
/// formulae". Journal of Computational and Applied Mathematics, 6(1), 19-26.
#[rustfmt::skip]
pub const DOPRI54: Tableau = Tableau {
    name: "DOPRI54",
    c: &[0.0, 1.0/5.0, 3.0/10.0, 4.0/5.0, 8.0/9.0, 1.0, 1.0],
    a: &[
        &[1.0/5.0],
        &[3.0/40.0, 9.0/40.0],
        &[44.0/45.0, -56.0/15.0, 32.0/9.0],
        &[19372.0/6561.0, -25360.0/2187.0, 64448.0/6561.0, -212.0/729.0],
        &[9017.0/3168.0, -355.0/33.0, 46732.0/5247.0, 49.0/176.0, -5103.0/18656.0],
        &[35.0/384.0, 0.0, 500.0/1113.0, 125.0/192.0, -2187.0/6784.0, 11.0/84.0],
    ],
    b: &[35.0/384.0, 0.0, 500.0/1113.0, 125.0/192.0, -2187.0/6784.0, 11.0/84.0, 0.0],
    error: Some(&[
        71.0/57600.0, 0.0, -71.0/16695.0, 71.0/1920.0, -17253.0/339200.0, 22.0/525.0, -1.0/40.0,
    ]),
    order: 5,
    error_order: 4,
};

/// Bogacki-Shampine 3(2), FSAL
///
/// Bogacki, P., & Shampine, L. F. (1989). "A 3(2) pair of Runge-Kutta
/// formulas". Applied Mathematics Letters, 2(4), 321-325.
#[rustfmt::skip]
pub const RKBS32: Tableau = Tableau {
    name: "RKBS32",
    c: &[0.0, 1.0/2.0, 3.0/4.0, 1.0],
    a: &[
        &[1.0/2.0],
        &[0.0, 3.0/4.0],
        &[2.0/9.0, 1.0/3.0, 4.0/9.0],
    ],
    b: &[2.0/9.0, 1.0/3.0, 4.0/9.0, 0.0],
    error: Some(&[-5.0/72.0, 1.0/12.0, 1.0/9.0, -1.0/8.0]),
    order: 3,
    error_order: 2,
};

/// Runge-Kutta-Fehlberg 4(5), propagating the 4th order solution
///
/// Fehlberg, E. (1969). "Low-order classical Runge-Kutta formulas with
/// stepsize control". NASA Technical Report TR R-315.
#[rustfmt::skip]
pub const RKF45: Tableau = Tableau {
    name: "RKF45",
    c: &[0.0, 1.0/4.0, 3.0/8.0, 12.0/13.0, 1.0, 1.0/2.0],
    a: &[
        &[1.0/4.0],
        &[3.0/32.0, 9.0/32.0],
        &[1932.0/2197.0, -7200.0/2197.0, 7296.0/2197.0],
        &[439.0/216.0, -8.0, 3680.0/513.0, -845.0/4104.0],
        &[-8.0/27.0, 2.0, -3554.0/2565.0, 1859.0/4104.0, -11.0/40.0],
    ],
    b: &[25.0/216.0, 0.0, 1408.0/2565.0, 2197.0/4104.0, -1.0/5.0, 0.0],
    error: Some(&[1.0/360.0, 0.0, -128.0/4275.0, -2197.0/75240.0, 1.0/50.0, 2.0/55.0]),
    order: 4,
    error_order: 4,
};

/// Classic 4th order Runge-Kutta, fixed step
#[rustfmt::skip]
pub const RK4: Tableau = Tableau {
    name: "RK4",
    c: &[0.0, 1.0/2.0, 1.0/2.0, 1.0],
    a: &[
        &[1.0/2.0],
        &[0.0, 1.0/2.0],
        &[0.0, 0.0, 1.0],
    ],
    b: &[1.0/6.0, 1.0/3.0, 1.0/3.0, 1.0/6.0],
    error: None,
    order: 4,
    error_order: 4,
};
