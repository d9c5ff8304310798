// BSD 3-Clause License
//
// Copyright (c) 2026, Dar Dahlen
//
// Redistribution and use in source and binary forms, with or without
// modification, are permitted provided that the following conditions are met:
//
// 1. Redistributions of source code must retain the above copyright notice, this
//    list of conditions and the following disclaimer.
//
// 2. Redistributions in binary form must reproduce the above copyright notice,
//    this list of conditions and the following disclaimer in the documentation
//    and/or other materials provided with the distribution.
//
// 3. Neither the name of the copyright holder nor the names of its
//    contributors may be used to endorse or promote products derived from
//    this software without specific prior written permission.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
// AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
// IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
// DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
// FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
// DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
// SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
// CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
// OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
// OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.

/// Fixed point iteration `x_{k+1} = func(x_k)` with a hard iteration cap.
///
/// Iteration stops early once two successive iterates differ by less than `atol`.
/// Reaching `max_iter` is not an error, the latest iterate is returned either way.
/// This makes the result accuracy a function of the cap, so callers choose the cap
/// knowing the contraction rate of `func`.
///
/// ```
///     use kepcat_fitting::fitting::fixed_point;
///     let root = fixed_point(|x: f64| x.cos(), 1.0, 1e-12, 200);
///     assert!((root - root.cos()).abs() < 1e-10);
///
///     // Capped at a single step.
///     let one = fixed_point(|x: f64| 0.5 * x + 1.0, 0.0, 1e-12, 1);
///     assert_eq!(one, 1.0);
/// ```
///
/// # Arguments
/// * `func` - Map whose fixed point is desired.
/// * `start` - First iterate.
/// * `atol` - Absolute tolerance between successive iterates.
/// * `max_iter` - Maximum number of applications of `func`.
#[inline(always)]
pub fn fixed_point<T>(func: impl Fn(T) -> T, start: T, atol: T, max_iter: usize) -> T
where
    T: num_traits::Float,
{
    let mut x = start;
    let mut next: T;
    for _ in 0..max_iter {
        next = func(x);
        let converged = (next - x).abs() < atol;
        x = next;
        if converged {
            break;
        }
    }
    x
}

#[cfg(test)]
mod tests {
    use crate::fitting::fixed_point;

    #[test]
    fn test_fixed_point_contraction() {
        let root = fixed_point(|x: f64| 0.5 * x + 1.0, 0.0, 1e-14, 200);
        assert!((root - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_fixed_point_cap() {
        // 0 -> 1 -> 1.5 -> 1.75 -> 1.875
        let capped = fixed_point(|x: f64| 0.5 * x + 1.0, 0.0, 1e-14, 4);
        assert!((capped - 1.875).abs() < 1e-15);
    }

    #[test]
    fn test_fixed_point_zero_iterations() {
        let x = fixed_point(|x: f64| x + 1.0, 3.0, 1e-9, 0);
        assert_eq!(x, 3.0);
    }

    #[test]
    fn test_fixed_point_early_exit() {
        let calls = std::cell::Cell::new(0);
        let x = fixed_point(
            |x: f64| {
                calls.set(calls.get() + 1);
                x
            },
            5.0,
            1e-9,
            4,
        );
        assert_eq!(x, 5.0);
        assert_eq!(calls.get(), 1);
    }
}
