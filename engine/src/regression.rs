//! Frame hashing helpers for render regression tests.
//!
//! Tests render a scripted run headlessly, hash each frame, and compare hash sequences across
//! runs (or against each other) instead of storing raw pixels.

use sha2::{Digest, Sha256};

use crate::graphics::{CpuRenderer, Renderer2d};
use crate::surface::{RgbaBuffer, SurfaceSize};
use crate::{GameLogic, HeadlessRunner};

pub fn rgba_sha256_hex(rgba: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(rgba);
    hex::encode(hasher.finalize())
}

/// Steps `runner` once per input and hashes the frame rendered after every step.
///
/// The first hash is of the initial state, so the result has `inputs.len() + 1` entries.
pub fn render_hashes<G, I, R>(
    runner: &mut HeadlessRunner<G>,
    size: SurfaceSize,
    inputs: I,
    mut render: R,
) -> Vec<String>
where
    G: GameLogic,
    I: IntoIterator<Item = G::Input>,
    R: FnMut(&G::State, &mut dyn Renderer2d),
{
    let mut buffer = RgbaBuffer::new(size);
    let mut hash_current = |state: &G::State, buffer: &mut RgbaBuffer| {
        let mut gfx = CpuRenderer::new(buffer.frame_mut(), size);
        gfx.begin_frame(size);
        render(state, &mut gfx);
        rgba_sha256_hex(buffer.frame())
    };

    let mut hashes = vec![hash_current(runner.state(), &mut buffer)];
    for input in inputs {
        runner.step(input);
        hashes.push(hash_current(runner.state(), &mut buffer));
    }
    hashes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::Rect;

    #[test]
    fn sha256_of_empty_input_is_well_known() {
        assert_eq!(
            rgba_sha256_hex(&[]),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn render_hashes_change_only_when_pixels_change() {
        struct Cursor;

        impl GameLogic for Cursor {
            type State = u32;
            type Input = u32;

            fn initial_state(&self) -> u32 {
                0
            }

            fn step(&self, state: &u32, input: u32) -> u32 {
                state + input
            }
        }

        let mut runner = HeadlessRunner::new(Cursor);
        let size = SurfaceSize::new(8, 1);
        let hashes = render_hashes(&mut runner, size, [0, 1, 0], |x, gfx| {
            gfx.clear([0, 0, 0, 255]);
            gfx.fill_rect(Rect::new(*x, 0, 1, 1), [255, 255, 255, 255]);
        });

        assert_eq!(hashes.len(), 4);
        assert_eq!(hashes[0], hashes[1]);
        assert_ne!(hashes[1], hashes[2]);
        assert_eq!(hashes[2], hashes[3]);
    }
}
