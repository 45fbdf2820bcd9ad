//! hourboard main entrypoint.

use hourboard::run;
use hourboard::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(format!("Error: {}", e));
        std::process::exit(1);
    }
}
