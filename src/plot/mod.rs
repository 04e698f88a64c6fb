//! Terminal plotting (ASCII grid renderer).

mod ascii;

pub use ascii::render_ascii_plot;
