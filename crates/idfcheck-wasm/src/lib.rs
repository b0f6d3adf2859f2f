#![deny(warnings)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::indexing_slicing)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! `IdfCheck` WASM module: IDF 3.0 parsing and mechanical rule checks.

pub mod checks;
pub mod error;
pub mod idf;
pub mod options;
pub mod report;

use std::cell::RefCell;

use wasm_bindgen::prelude::*;

use crate::checks::{PartLibrary, PartsLibrary};
use crate::idf::Board;
use crate::options::CheckOptions;
use crate::report::{render_console, render_log, BoardReport};

thread_local! {
    static LAST_BOARD: RefCell<Option<Board>> = const { RefCell::new(None) };
}

fn store_board(board: Option<Board>) {
    LAST_BOARD.with(|b| {
        *b.borrow_mut() = board;
    });
}

/// Initialize the WASM module. Sets up the panic hook and console logger.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_ok() {
        log::debug!("idfcheck logger initialized");
    }
}

/// Smoke-test export. Returns 42.
#[allow(clippy::missing_const_for_fn)]
#[wasm_bindgen]
pub fn ping() -> u32 {
    42
}

/// Parse one IDF 3.0 file and run every rule against it.
///
/// `library` is the list of known part names; pass `undefined` to skip the
/// library rule. `options` is an optional [`CheckOptions`] object.
/// Returns a [`BoardReport`] as a `JsValue` via `serde-wasm-bindgen`. The
/// checked board is kept for [`get_diagnostics`], [`get_console_text`], and
/// [`get_log_text`].
///
/// # Errors
///
/// Returns a descriptive error string if the options are malformed or the
/// file fails to parse.
#[wasm_bindgen]
pub fn check_idf(
    data: &[u8],
    file_name: &str,
    library: Option<Vec<String>>,
    options: JsValue,
) -> Result<JsValue, JsValue> {
    let options = options_from_js(options)?;
    let library: Option<PartsLibrary> = library.map(|names| names.into_iter().collect());
    let report = check_idf_internal(
        data,
        file_name,
        library.as_ref().map(|l| l as &dyn PartLibrary),
        &options,
    )
    .map_err(|e| JsValue::from_str(&e))?;
    serde_wasm_bindgen::to_value(&report).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn options_from_js(options: JsValue) -> Result<CheckOptions, JsValue> {
    if options.is_undefined() || options.is_null() {
        return Ok(CheckOptions::default());
    }
    serde_wasm_bindgen::from_value(options)
        .map_err(|e| JsValue::from_str(&format!("invalid options: {e}")))
}

/// Internal check logic shared between the wasm export and native tests.
#[doc(hidden)]
pub fn check_idf_internal(
    data: &[u8],
    file_name: &str,
    library: Option<&dyn PartLibrary>,
    options: &CheckOptions,
) -> Result<BoardReport, String> {
    let mut board = match Board::parse(data, file_name) {
        Ok(board) => board,
        Err(err) => {
            log::warn!("{file_name}: {err}");
            store_board(None);
            return Err(err.to_string());
        }
    };

    checks::run_all(&mut board, library, options);
    let report = BoardReport::from(&board);

    store_board(Some(board));

    Ok(report)
}

/// Retrieve the diagnostics of the last checked board.
///
/// Returns an empty array if no board has been checked, or the last check
/// failed to parse.
#[wasm_bindgen]
pub fn get_diagnostics() -> Vec<String> {
    LAST_BOARD.with(|b| {
        b.borrow()
            .as_ref()
            .map_or_else(Vec::new, |board| board.diagnostics().to_vec())
    })
}

/// Render the last checked board for a console: its diagnostics, or
/// `No errors detected!`.
#[wasm_bindgen]
pub fn get_console_text() -> String {
    LAST_BOARD.with(|b| b.borrow().as_ref().map_or_else(String::new, render_console))
}

/// Render the last checked board in log-file form, headed by its file name.
#[wasm_bindgen]
pub fn get_log_text() -> String {
    LAST_BOARD.with(|b| {
        b.borrow().as_ref().map_or_else(String::new, |board| {
            render_log(std::slice::from_ref(board))
        })
    })
}
