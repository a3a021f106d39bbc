// Create the Error, ErrorKind, ResultExt, and Result types.
// Result is a typedef of std `Result` with the error type our own `Error`.
// ResultExt adds the `chain_err` trait method.
use error_chain::*;

error_chain! {

    foreign_links {
        Io(::std::io::Error);
        ImageSaveError(::image::ImageError);
    }

    errors {
        InvalidDimensions(width: usize, height: usize) {
            description("maze dimensions must both be positive")
            display("invalid maze dimensions {}x{}, width and height must both be positive", width, height)
        }
        ImageTooLarge(tiles_wide: usize, tiles_high: usize, cell_pixels: u32) {
            description("image dimensions overflow")
            display("a {}x{} display grid at {} pixels per tile is too large for an image",
                    tiles_wide, tiles_high, cell_pixels)
        }
        CoordinateOutOfRange(x: u32, y: u32) {
            description("coordinate outside of the grid")
            display("coordinate ({}, {}) is outside of the grid", x, y)
        }
    }
}
