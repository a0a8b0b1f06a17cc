//! Truncated IAU 2000B nutation
//!
//! The 77 largest lunisolar terms of IAU 2000A with fixed offsets standing in
//! for the planetary terms. Good to about 1 mas between 1995 and 2050.

use super::{Nutation, NutationAngles};
use crate::constants::{ASEC2RAD, ASEC360, J2000, JULIAN_CENTURY};
use crate::coordinates::normalize_radians;

/// Planetary nutation offsets replacing the omitted terms, arcseconds
const PLANETARY_DPSI: f64 = -0.000_135;
const PLANETARY_DEPS: f64 = 0.000_388;

/// One amplitude unit of the table (0.1 µas), in arcseconds
const UNIT_ARCSEC: f64 = 1e-7;

/// Delaunay arguments `[l, l', F, D, Ω]` in radians for `t` Julian centuries
/// (TDB) from J2000
pub fn fundamental_arguments(t: f64) -> [f64; 5] {
    let series = [
        [485_868.249_036, 1_717_915_923.217_8, 31.879_2, 0.051_635, -0.000_244_70],
        [1_287_104.793_05, 129_596_581.048_1, -0.553_2, 0.000_136, -0.000_011_49],
        [335_779.526_232, 1_739_527_262.847_8, -12.751_2, -0.001_037, 0.000_004_17],
        [1_072_260.703_69, 1_602_961_601.209_0, -6.370_6, 0.006_593, -0.000_031_69],
        [450_160.398_036, -6_962_890.543_1, 7.472_2, 0.007_702, -0.000_059_39],
    ];
    series.map(|c| {
        let arcsec = (((c[4] * t + c[3]) * t + c[2]) * t + c[1]) * t + c[0];
        normalize_radians((arcsec % ASEC360) * ASEC2RAD)
    })
}

/// Each row: multipliers of `l, l', F, D, Ω`, then `S, S', C, C'` in units
/// of 0.1 µas (`Δψ = (S + S't) sin arg`, `Δε = (C + C't) cos arg`).
#[rustfmt::skip]
const LUNISOLAR_TERMS: [[i64; 9]; 77] = [
    //  l   l'   F    D    Ω        S           S'           C           C'
    [   0,   0,   0,   0,   1, -172064161,  -174666,   92052331,    9086],
    [   0,   0,   2,  -2,   2,  -13170906,    -1675,    5730336,   -3015],
    [   0,   0,   2,   0,   2,   -2276413,     -234,     978459,    -485],
    [   0,   0,   0,   0,   2,    2074554,      207,    -897492,     470],
    [   0,   1,   0,   0,   0,    1475877,    -3633,      73871,    -184],
    [   0,   1,   2,  -2,   2,    -516821,     1226,     224386,    -677],
    [   1,   0,   0,   0,   0,     711159,       73,      -6750,       0],
    [   0,   0,   2,   0,   1,    -387298,     -367,     200728,      18],
    [   1,   0,   2,   0,   2,    -301461,      -36,     129025,     -63],
    [   0,  -1,   2,  -2,   2,     215829,     -494,     -95929,     299],
    [   0,   0,   2,  -2,   1,     128227,      137,     -68982,      -9],
    [  -1,   0,   2,   0,   2,     123457,       11,     -53311,      32],
    [  -1,   0,   0,   2,   0,     156994,       10,      -1235,       0],
    [   1,   0,   0,   0,   1,      63110,       63,     -33228,       0],
    [  -1,   0,   0,   0,   1,     -57976,      -63,      31429,       0],
    [  -1,   0,   2,   2,   2,     -59641,      -11,      25543,     -11],
    [   1,   0,   2,   0,   1,     -51613,      -42,      26366,       0],
    [  -2,   0,   2,   0,   1,      45893,       50,     -24236,     -10],
    [   0,   0,   0,   2,   0,      63384,       11,      -1220,       0],
    [   0,   0,   2,   2,   2,     -38571,       -1,      16452,     -11],
    [   0,  -2,   2,  -2,   2,      32481,        0,     -13870,       0],
    [  -2,   0,   0,   2,   0,     -47722,        0,        477,       0],
    [   2,   0,   2,   0,   2,     -31046,       -1,      13238,     -11],
    [   1,   0,   2,  -2,   2,      28593,        0,     -12338,      10],
    [  -1,   0,   2,   0,   1,      20441,       21,     -10758,       0],
    [   2,   0,   0,   0,   0,      29243,        0,       -609,       0],
    [   0,   0,   2,   0,   0,      25887,        0,       -550,       0],
    [   0,   1,   0,   0,   1,     -14053,      -25,       8551,      -2],
    [  -1,   0,   0,   2,   1,      15164,       10,      -8001,       0],
    [   0,   2,   2,  -2,   2,     -15794,       72,       6850,     -42],
    [   0,   0,  -2,   2,   0,      21783,        0,       -167,       0],
    [   1,   0,   0,  -2,   1,     -12873,      -10,       6953,       0],
    [   0,  -1,   0,   0,   1,     -12654,       11,       6415,       0],
    [  -1,   0,   2,   2,   1,     -10204,        0,       5222,       0],
    [   0,   2,   0,   0,   0,      16707,      -85,        168,      -1],
    [   1,   0,   2,   2,   2,      -7691,        0,       3268,       0],
    [  -2,   0,   2,   0,   0,     -11024,        0,        104,       0],
    [   0,   1,   2,   0,   2,       7566,      -21,      -3250,       0],
    [   0,   0,   2,   2,   1,      -6637,      -11,       3353,       0],
    [   0,  -1,   2,   0,   2,      -7141,       21,       3070,       0],
    [   0,   0,   0,   2,   1,      -6302,      -11,       3272,       0],
    [   1,   0,   2,  -2,   1,       5800,       10,      -3045,       0],
    [   2,   0,   2,  -2,   2,       6443,        0,      -2768,       0],
    [  -2,   0,   0,   2,   1,      -5774,      -11,       3041,       0],
    [   2,   0,   2,   0,   1,      -5350,        0,       2695,       0],
    [   0,  -1,   2,  -2,   1,      -4752,      -11,       2719,       0],
    [   0,   0,   0,  -2,   1,      -4940,      -11,       2720,       0],
    [  -1,  -1,   0,   2,   0,       7350,        0,        -51,       0],
    [   2,   0,   0,  -2,   1,      -4803,      -11,       2556,       0],
    [   1,   0,   0,   2,   0,      -7677,        0,        462,       0],
    [   0,   1,   2,  -2,   1,       5417,        0,      -2520,       0],
    [   1,  -1,   0,   0,   0,       6624,        0,       -468,       0],
    [  -2,   0,   2,   0,   2,      -5433,        0,       2334,       0],
    [   3,   0,   2,   0,   2,      -4632,        0,       1991,       0],
    [   0,  -1,   0,   2,   0,       6106,        0,       -167,       0],
    [   1,  -1,   2,   0,   2,      -3593,        0,       1556,       0],
    [   0,   0,   0,   1,   0,      -4766,        0,        270,       0],
    [  -1,  -1,   2,   2,   2,      -4095,        0,       1793,       0],
    [  -1,   0,   2,   0,   0,       4229,        0,       -101,       0],
    [   0,  -1,   2,   2,   2,      -3372,        0,       1487,       0],
    [   2,   0,   0,   0,   1,      -3353,        0,       1758,       0],
    [   1,   0,   2,   0,   0,      -3523,        0,        246,       0],
    [   1,   1,   0,   0,   0,      -3613,        0,        329,       0],
    [  -1,   0,   2,  -2,   1,       3522,        0,      -1830,       0],
    [   2,   0,   0,   0,  -1,       3312,        0,      -1730,       0],
    [   0,   0,  -2,   2,   1,      -3142,        0,       1704,       0],
    [   0,   1,   0,   0,  -1,      -2927,        0,       1564,       0],
    [   0,   1,   2,   0,   1,      -2887,        0,       1401,       0],
    [   0,  -1,   2,   0,   1,       2451,        0,      -1200,       0],
    [   2,   0,  -2,   0,   0,      -2790,        0,        410,       0],
    [  -1,   0,   0,   2,  -1,       2145,        0,      -1154,       0],
    [   0,   0,   2,  -2,   0,       2816,        0,        286,       0],
    [   0,   1,   0,  -2,   0,       2700,        0,       -258,       0],
    [   1,   0,   0,  -1,   0,      -2330,        0,        -37,       0],
    [   0,   0,   0,   0,   2,       2283,        0,      -1039,       0],
    [   1,   0,  -2,   0,   0,      -2321,        0,        284,       0],
    [  -1,   0,   0,   1,   1,      -2049,        0,       1112,       0],
];

/// IAU 2000B nutation series
#[derive(Debug, Clone, Copy, Default)]
pub struct Iau2000B;

impl Iau2000B {
    pub fn new() -> Self {
        Self
    }

    /// Δψ and Δε in arcseconds for `t` Julian centuries from J2000
    pub fn arcseconds(&self, t: f64) -> (f64, f64) {
        let args = fundamental_arguments(t);
        let mut dpsi = 0.0;
        let mut deps = 0.0;
        for row in LUNISOLAR_TERMS.iter().rev() {
            let arg: f64 = row[..5]
                .iter()
                .zip(args.iter())
                .map(|(&n, &a)| n as f64 * a)
                .sum();
            let (s, c) = arg.sin_cos();
            dpsi += (row[5] as f64 + row[6] as f64 * t) * s;
            deps += (row[7] as f64 + row[8] as f64 * t) * c;
        }
        (
            dpsi * UNIT_ARCSEC + PLANETARY_DPSI,
            deps * UNIT_ARCSEC + PLANETARY_DEPS,
        )
    }
}

impl Nutation for Iau2000B {
    fn angles(&self, jd_tt: f64) -> NutationAngles {
        let (dpsi, deps) = self.arcseconds((jd_tt - J2000) / JULIAN_CENTURY);
        NutationAngles {
            dpsi: dpsi * ASEC2RAD,
            deps: deps * ASEC2RAD,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_value_at_j2000() {
        // IAU 2000A gives -13.9323" and -5.7697" at 2000-01-01 12h TT
        let (dpsi, deps) = Iau2000B::new().arcseconds(0.0);
        assert_abs_diff_eq!(dpsi, -13.9323, epsilon = 0.05);
        assert_abs_diff_eq!(deps, -5.7697, epsilon = 0.05);
    }

    #[test]
    fn test_amplitude_bounds() {
        let n = Iau2000B::new();
        for i in 0..200 {
            let jd = J2000 + 50.0 * i as f64;
            let a = n.angles(jd);
            assert!(a.dpsi.abs() < 20.0 * ASEC2RAD);
            assert!(a.deps.abs() < 10.5 * ASEC2RAD);
        }
    }

    #[test]
    fn test_node_argument_at_j2000() {
        // Mean longitude of the lunar node was about 125.04 degrees
        let args = fundamental_arguments(0.0);
        assert_abs_diff_eq!(args[4].to_degrees(), 125.0445, epsilon = 1e-3);
    }
}
