//! Chi-square distribution tail probabilities.

use std::f64::consts::PI;

const LANCZOS_G: f64 = 7.0;
#[rustfmt::skip]
const LANCZOS_COEFFICIENTS: [f64; 9] = [
    0.999_999_999_999_809_9,
    676.520_368_121_885_1,
    -1_259.139_216_722_402_8,
    771.323_428_777_653_1,
    -176.615_029_162_140_6,
    12.507_343_278_686_905,
    -0.138_571_095_265_720_12,
    9.984_369_578_019_572e-6,
    1.505_632_735_149_311_6e-7,
];

const MAX_ITERATIONS: usize = 10_000;
const EPSILON: f64 = 1e-15;
const TINY: f64 = 1e-300;

/// Natural logarithm of the gamma function for `x >= 0.5`.
fn ln_gamma(x: f64) -> f64 {
    let x = x - 1.0;
    let mut sum = LANCZOS_COEFFICIENTS[0];
    for (index, coefficient) in LANCZOS_COEFFICIENTS.iter().enumerate().skip(1) {
        sum += coefficient / (x + index as f64);
    }
    let t = x + LANCZOS_G + 0.5;
    0.5 * (2.0 * PI).ln() + (x + 0.5) * t.ln() - t + sum.ln()
}

/// Lower regularized incomplete gamma function P(a, x) as a power series.
/// Converges quickly for `x < a + 1`.
fn lower_gamma_series(a: f64, x: f64) -> f64 {
    let mut denominator = a;
    let mut term = 1.0 / a;
    let mut sum = term;
    for _ in 0..MAX_ITERATIONS {
        denominator += 1.0;
        term *= x / denominator;
        sum += term;
        if term.abs() < sum.abs() * EPSILON {
            break;
        }
    }
    sum * (-x + a * x.ln() - ln_gamma(a)).exp()
}

/// Upper regularized incomplete gamma function Q(a, x) as a continued
/// fraction (modified Lentz). Converges quickly for `x >= a + 1`.
fn upper_gamma_continued_fraction(a: f64, x: f64) -> f64 {
    let mut b = x + 1.0 - a;
    let mut c = 1.0 / TINY;
    let mut d = 1.0 / b;
    let mut fraction = d;
    for iteration in 1..MAX_ITERATIONS {
        let an = -(iteration as f64) * (iteration as f64 - a);
        b += 2.0;
        d = an * d + b;
        if d.abs() < TINY {
            d = TINY;
        }
        c = b + an / c;
        if c.abs() < TINY {
            c = TINY;
        }
        d = 1.0 / d;
        let delta = d * c;
        fraction *= delta;
        if (delta - 1.0).abs() < EPSILON {
            break;
        }
    }
    (-x + a * x.ln() - ln_gamma(a)).exp() * fraction
}

/// Probability that a chi-square distributed variable with the given degrees
/// of freedom is at least `statistic`.
pub fn chi_square_survival(statistic: f64, degrees_of_freedom: u32) -> f64 {
    if statistic.is_nan() || degrees_of_freedom == 0 {
        return f64::NAN;
    }
    if statistic <= 0.0 {
        return 1.0;
    }
    if statistic.is_infinite() {
        return 0.0;
    }
    let a = degrees_of_freedom as f64 / 2.0;
    let x = statistic / 2.0;
    let survival = if x < a + 1.0 {
        1.0 - lower_gamma_series(a, x)
    } else {
        upper_gamma_continued_fraction(a, x)
    };
    survival.clamp(0.0, 1.0)
}

#[cfg(test)]
mod test {
    use super::{chi_square_survival, ln_gamma};

    fn assert_close(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() < tolerance,
            "expected {}, but was {}",
            expected,
            actual
        );
    }

    #[test]
    fn ln_gamma_of_known_values() {
        assert_close(ln_gamma(1.0), 0.0, 1e-12);
        assert_close(ln_gamma(5.0), 24_f64.ln(), 1e-12);
        assert_close(ln_gamma(0.5), std::f64::consts::PI.sqrt().ln(), 1e-12);
    }

    #[test]
    fn survival_with_two_degrees_of_freedom_is_exponential() {
        for statistic in [0.5, 2.0, 7.0, 30.0] {
            assert_close(
                chi_square_survival(statistic, 2),
                (-statistic / 2.0).exp(),
                1e-12,
            );
        }
    }

    #[test]
    fn survival_with_one_degree_of_freedom() {
        // 3.841458820694124 is the 95% quantile
        assert_close(chi_square_survival(3.841_458_820_694_124, 1), 0.05, 1e-9);
    }

    #[test]
    fn survival_with_many_degrees_of_freedom() {
        // reference values of the regularized upper incomplete gamma Q(127.5, x / 2)
        assert_close(chi_square_survival(200.0, 255), 0.995_425_444_541_951_9, 1e-9);
        assert_close(chi_square_survival(255.0, 255), 0.488_222_521_770_406_3, 1e-9);
        assert_close(chi_square_survival(300.0, 255), 0.027_727_522_053_904_83, 1e-9);
    }

    #[test]
    fn survival_bounds() {
        assert_eq!(chi_square_survival(0.0, 255), 1.0);
        assert_eq!(chi_square_survival(f64::INFINITY, 255), 0.0);
        assert!(chi_square_survival(1e7, 255) < 1e-300);
        assert!(chi_square_survival(f64::NAN, 255).is_nan());
        assert!(chi_square_survival(1.0, 0).is_nan());
    }
}
