use warpmc_motion::PIXEL_PREC_SHIFTS;

/// Number of taps of the per-pixel interpolation filter.
pub const PIXEL_FILTER_TAPS: usize = 6;

/// Number of taps of the block warp filter.
pub const WARP_FILTER_TAPS: usize = 8;

/// Number of phases of the block warp filter, covering offsets in `[-1, 2)` pixels.
pub const WARP_FILTER_PHASES: usize = 3 * PIXEL_PREC_SHIFTS as usize;

/// 6-tap interpolation filter, one row per 1/64 pixel phase.
///
/// Tap `k` of a row weighs the sample at offset `k - 2` from the integer position.
/// Every row sums to `1 << FILTER_BITS`.
#[rustfmt::skip]
pub static WARPED_PIXEL_FILTER: [[i16; PIXEL_FILTER_TAPS]; PIXEL_PREC_SHIFTS as usize] = [
    [0, 0, 128, 0, 0, 0], [0, -1, 128, 2, -1, 0], [1, -3, 127, 4, -1, 0], [1, -4, 126, 6, -2, 1],
    [1, -5, 126, 8, -3, 1], [1, -6, 125, 11, -4, 1], [1, -7, 124, 13, -4, 1], [2, -8, 123, 15, -5, 1],
    [2, -9, 122, 18, -6, 1], [2, -10, 121, 20, -6, 1], [2, -11, 120, 22, -7, 2], [2, -12, 119, 25, -8, 2],
    [3, -13, 117, 27, -8, 2], [3, -13, 116, 29, -9, 2], [3, -14, 114, 32, -10, 3], [3, -15, 113, 35, -10, 2],
    [3, -15, 111, 37, -11, 3], [3, -16, 109, 40, -11, 3], [3, -16, 108, 42, -12, 3], [4, -17, 106, 45, -13, 3],
    [4, -17, 104, 47, -13, 3], [4, -17, 102, 50, -14, 3], [4, -17, 100, 52, -14, 3], [4, -18, 98, 55, -15, 4],
    [4, -18, 96, 58, -15, 3], [4, -18, 94, 60, -16, 4], [4, -18, 91, 63, -16, 4], [4, -18, 89, 65, -16, 4],
    [4, -18, 87, 68, -17, 4], [4, -18, 85, 70, -17, 4], [4, -18, 82, 73, -17, 4], [4, -18, 80, 75, -17, 4],
    [4, -18, 78, 78, -18, 4], [4, -17, 75, 80, -18, 4], [4, -17, 73, 82, -18, 4], [4, -17, 70, 85, -18, 4],
    [4, -17, 68, 87, -18, 4], [4, -16, 65, 89, -18, 4], [4, -16, 63, 91, -18, 4], [4, -16, 60, 94, -18, 4],
    [3, -15, 58, 96, -18, 4], [4, -15, 55, 98, -18, 4], [3, -14, 52, 100, -17, 4], [3, -14, 50, 102, -17, 4],
    [3, -13, 47, 104, -17, 4], [3, -13, 45, 106, -17, 4], [3, -12, 42, 108, -16, 3], [3, -11, 40, 109, -16, 3],
    [3, -11, 37, 111, -15, 3], [2, -10, 35, 113, -15, 3], [3, -10, 32, 114, -14, 3], [2, -9, 29, 116, -13, 3],
    [2, -8, 27, 117, -13, 3], [2, -8, 25, 119, -12, 2], [2, -7, 22, 120, -11, 2], [1, -6, 20, 121, -10, 2],
    [1, -6, 18, 122, -9, 2], [1, -5, 15, 123, -8, 2], [1, -4, 13, 124, -7, 1], [1, -4, 11, 125, -6, 1],
    [1, -3, 8, 126, -5, 1], [1, -2, 6, 126, -4, 1], [0, -1, 4, 127, -3, 1], [0, -1, 2, 128, -1, 0],
];

/// 8-tap block warp filter.
///
/// The block filter applies a varying sub-pixel offset to every column of an 8x8
/// block, so the effective phase spans `[-1, 2)` pixels: rows `0..64` cover
/// `[-1, 0)`, rows `64..128` cover `[0, 1)` and rows `128..192` cover `[1, 2)`.
/// Tap `k` weighs the sample at offset `k - 3`.
#[rustfmt::skip]
pub static WARPED_FILTER: [[i16; WARP_FILTER_TAPS]; WARP_FILTER_PHASES] = [
    // [-1, 0)
    [0, 0, 128, 0, 0, 0, 0, 0], [0, -1, 128, 2, -1, 0, 0, 0],
    [1, -3, 127, 4, -1, 0, 0, 0], [1, -4, 126, 6, -2, 1, 0, 0],
    [1, -5, 126, 8, -3, 1, 0, 0], [1, -6, 125, 11, -4, 1, 0, 0],
    [1, -7, 124, 13, -4, 1, 0, 0], [2, -8, 123, 15, -5, 1, 0, 0],
    [2, -9, 122, 18, -6, 1, 0, 0], [2, -10, 121, 20, -6, 1, 0, 0],
    [2, -11, 120, 22, -7, 2, 0, 0], [2, -12, 119, 25, -8, 2, 0, 0],
    [3, -13, 117, 27, -8, 2, 0, 0], [3, -13, 116, 29, -9, 2, 0, 0],
    [3, -14, 114, 32, -10, 3, 0, 0], [3, -15, 113, 35, -10, 2, 0, 0],
    [3, -15, 111, 37, -11, 3, 0, 0], [3, -16, 109, 40, -11, 3, 0, 0],
    [3, -16, 108, 42, -12, 3, 0, 0], [4, -17, 106, 45, -13, 3, 0, 0],
    [4, -17, 104, 47, -13, 3, 0, 0], [4, -17, 102, 50, -14, 3, 0, 0],
    [4, -17, 100, 52, -14, 3, 0, 0], [4, -18, 98, 55, -15, 4, 0, 0],
    [4, -18, 96, 58, -15, 3, 0, 0], [4, -18, 94, 60, -16, 4, 0, 0],
    [4, -18, 91, 63, -16, 4, 0, 0], [4, -18, 89, 65, -16, 4, 0, 0],
    [4, -18, 87, 68, -17, 4, 0, 0], [4, -18, 85, 70, -17, 4, 0, 0],
    [4, -18, 82, 73, -17, 4, 0, 0], [4, -18, 80, 75, -17, 4, 0, 0],
    [4, -18, 78, 78, -18, 4, 0, 0], [4, -17, 75, 80, -18, 4, 0, 0],
    [4, -17, 73, 82, -18, 4, 0, 0], [4, -17, 70, 85, -18, 4, 0, 0],
    [4, -17, 68, 87, -18, 4, 0, 0], [4, -16, 65, 89, -18, 4, 0, 0],
    [4, -16, 63, 91, -18, 4, 0, 0], [4, -16, 60, 94, -18, 4, 0, 0],
    [3, -15, 58, 96, -18, 4, 0, 0], [4, -15, 55, 98, -18, 4, 0, 0],
    [3, -14, 52, 100, -17, 4, 0, 0], [3, -14, 50, 102, -17, 4, 0, 0],
    [3, -13, 47, 104, -17, 4, 0, 0], [3, -13, 45, 106, -17, 4, 0, 0],
    [3, -12, 42, 108, -16, 3, 0, 0], [3, -11, 40, 109, -16, 3, 0, 0],
    [3, -11, 37, 111, -15, 3, 0, 0], [2, -10, 35, 113, -15, 3, 0, 0],
    [3, -10, 32, 114, -14, 3, 0, 0], [2, -9, 29, 116, -13, 3, 0, 0],
    [2, -8, 27, 117, -13, 3, 0, 0], [2, -8, 25, 119, -12, 2, 0, 0],
    [2, -7, 22, 120, -11, 2, 0, 0], [1, -6, 20, 121, -10, 2, 0, 0],
    [1, -6, 18, 122, -9, 2, 0, 0], [1, -5, 15, 123, -8, 2, 0, 0],
    [1, -4, 13, 124, -7, 1, 0, 0], [1, -4, 11, 125, -6, 1, 0, 0],
    [1, -3, 8, 126, -5, 1, 0, 0], [1, -2, 6, 126, -4, 1, 0, 0],
    [0, -1, 4, 127, -3, 1, 0, 0], [0, -1, 2, 128, -1, 0, 0, 0],
    // [0, 1)
    [0, 0, 0, 128, 0, 0, 0, 0], [0, 1, -2, 128, 2, -1, 0, 0],
    [0, 1, -3, 127, 4, -2, 1, 0], [0, 1, -5, 127, 6, -2, 1, 0],
    [0, 2, -6, 126, 8, -3, 1, 0], [-1, 2, -7, 126, 11, -4, 2, -1],
    [-1, 3, -8, 125, 13, -5, 2, -1], [-1, 3, -10, 124, 16, -6, 3, -1],
    [-1, 4, -11, 123, 18, -7, 3, -1], [-1, 4, -12, 122, 20, -7, 3, -1],
    [-1, 4, -13, 121, 23, -8, 3, -1], [-2, 5, -14, 120, 25, -9, 4, -1],
    [-1, 5, -15, 119, 27, -10, 4, -1], [-1, 5, -16, 118, 30, -11, 4, -1],
    [-2, 6, -17, 116, 33, -12, 5, -1], [-2, 6, -17, 114, 35, -12, 5, -1],
    [-2, 6, -18, 113, 38, -13, 5, -1], [-2, 7, -19, 111, 41, -14, 6, -2],
    [-2, 7, -19, 110, 43, -15, 6, -2], [-2, 7, -20, 108, 46, -15, 6, -2],
    [-2, 7, -20, 106, 49, -16, 6, -2], [-2, 7, -21, 104, 51, -16, 7, -2],
    [-2, 7, -21, 102, 54, -17, 7, -2], [-2, 8, -21, 100, 56, -18, 7, -2],
    [-2, 8, -22, 98, 59, -18, 7, -2], [-2, 8, -22, 96, 62, -19, 7, -2],
    [-2, 8, -22, 94, 64, -19, 7, -2], [-2, 8, -22, 91, 67, -20, 8, -2],
    [-2, 8, -22, 89, 69, -20, 8, -2], [-2, 8, -22, 87, 72, -21, 8, -2],
    [-2, 8, -21, 84, 74, -21, 8, -2], [-2, 8, -22, 82, 77, -21, 8, -2],
    [-2, 8, -21, 79, 79, -21, 8, -2], [-2, 8, -21, 77, 82, -22, 8, -2],
    [-2, 8, -21, 74, 84, -21, 8, -2], [-2, 8, -21, 72, 87, -22, 8, -2],
    [-2, 8, -20, 69, 89, -22, 8, -2], [-2, 8, -20, 67, 91, -22, 8, -2],
    [-2, 7, -19, 64, 94, -22, 8, -2], [-2, 7, -19, 62, 96, -22, 8, -2],
    [-2, 7, -18, 59, 98, -22, 8, -2], [-2, 7, -18, 56, 100, -21, 8, -2],
    [-2, 7, -17, 54, 102, -21, 7, -2], [-2, 7, -16, 51, 104, -21, 7, -2],
    [-2, 6, -16, 49, 106, -20, 7, -2], [-2, 6, -15, 46, 108, -20, 7, -2],
    [-2, 6, -15, 43, 110, -19, 7, -2], [-2, 6, -14, 41, 111, -19, 7, -2],
    [-1, 5, -13, 38, 113, -18, 6, -2], [-1, 5, -12, 35, 114, -17, 6, -2],
    [-1, 5, -12, 33, 116, -17, 6, -2], [-1, 4, -11, 30, 118, -16, 5, -1],
    [-1, 4, -10, 27, 119, -15, 5, -1], [-1, 4, -9, 25, 120, -14, 5, -2],
    [-1, 3, -8, 23, 121, -13, 4, -1], [-1, 3, -7, 20, 122, -12, 4, -1],
    [-1, 3, -7, 18, 123, -11, 4, -1], [-1, 3, -6, 16, 124, -10, 3, -1],
    [-1, 2, -5, 13, 125, -8, 3, -1], [-1, 2, -4, 11, 126, -7, 2, -1],
    [0, 1, -3, 8, 126, -6, 2, 0], [0, 1, -2, 6, 127, -5, 1, 0],
    [0, 1, -2, 4, 127, -3, 1, 0], [0, 0, -1, 2, 128, -2, 1, 0],
    // [1, 2)
    [0, 0, 0, 0, 128, 0, 0, 0], [0, 0, 0, -1, 128, 2, -1, 0],
    [0, 0, 1, -3, 127, 4, -1, 0], [0, 0, 1, -4, 126, 6, -2, 1],
    [0, 0, 1, -5, 126, 8, -3, 1], [0, 0, 1, -6, 125, 11, -4, 1],
    [0, 0, 1, -7, 124, 13, -4, 1], [0, 0, 2, -8, 123, 15, -5, 1],
    [0, 0, 2, -9, 122, 18, -6, 1], [0, 0, 2, -10, 121, 20, -6, 1],
    [0, 0, 2, -11, 120, 22, -7, 2], [0, 0, 2, -12, 119, 25, -8, 2],
    [0, 0, 3, -13, 117, 27, -8, 2], [0, 0, 3, -13, 116, 29, -9, 2],
    [0, 0, 3, -14, 114, 32, -10, 3], [0, 0, 3, -15, 113, 35, -10, 2],
    [0, 0, 3, -15, 111, 37, -11, 3], [0, 0, 3, -16, 109, 40, -11, 3],
    [0, 0, 3, -16, 108, 42, -12, 3], [0, 0, 4, -17, 106, 45, -13, 3],
    [0, 0, 4, -17, 104, 47, -13, 3], [0, 0, 4, -17, 102, 50, -14, 3],
    [0, 0, 4, -17, 100, 52, -14, 3], [0, 0, 4, -18, 98, 55, -15, 4],
    [0, 0, 4, -18, 96, 58, -15, 3], [0, 0, 4, -18, 94, 60, -16, 4],
    [0, 0, 4, -18, 91, 63, -16, 4], [0, 0, 4, -18, 89, 65, -16, 4],
    [0, 0, 4, -18, 87, 68, -17, 4], [0, 0, 4, -18, 85, 70, -17, 4],
    [0, 0, 4, -18, 82, 73, -17, 4], [0, 0, 4, -18, 80, 75, -17, 4],
    [0, 0, 4, -18, 78, 78, -18, 4], [0, 0, 4, -17, 75, 80, -18, 4],
    [0, 0, 4, -17, 73, 82, -18, 4], [0, 0, 4, -17, 70, 85, -18, 4],
    [0, 0, 4, -17, 68, 87, -18, 4], [0, 0, 4, -16, 65, 89, -18, 4],
    [0, 0, 4, -16, 63, 91, -18, 4], [0, 0, 4, -16, 60, 94, -18, 4],
    [0, 0, 3, -15, 58, 96, -18, 4], [0, 0, 4, -15, 55, 98, -18, 4],
    [0, 0, 3, -14, 52, 100, -17, 4], [0, 0, 3, -14, 50, 102, -17, 4],
    [0, 0, 3, -13, 47, 104, -17, 4], [0, 0, 3, -13, 45, 106, -17, 4],
    [0, 0, 3, -12, 42, 108, -16, 3], [0, 0, 3, -11, 40, 109, -16, 3],
    [0, 0, 3, -11, 37, 111, -15, 3], [0, 0, 2, -10, 35, 113, -15, 3],
    [0, 0, 3, -10, 32, 114, -14, 3], [0, 0, 2, -9, 29, 116, -13, 3],
    [0, 0, 2, -8, 27, 117, -13, 3], [0, 0, 2, -8, 25, 119, -12, 2],
    [0, 0, 2, -7, 22, 120, -11, 2], [0, 0, 1, -6, 20, 121, -10, 2],
    [0, 0, 1, -6, 18, 122, -9, 2], [0, 0, 1, -5, 15, 123, -8, 2],
    [0, 0, 1, -4, 13, 124, -7, 1], [0, 0, 1, -4, 11, 125, -6, 1],
    [0, 0, 1, -3, 8, 126, -5, 1], [0, 0, 1, -2, 6, 126, -4, 1],
    [0, 0, 0, -1, 4, 127, -3, 1], [0, 0, 0, -1, 2, 128, -1, 0],
];
