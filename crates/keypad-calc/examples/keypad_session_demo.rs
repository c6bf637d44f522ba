//! Keypad Session Demo
//!
//! Clicks keypad buttons against a scripted backend, so no compute
//! endpoint is needed.
//!
//! Run with: cargo run --example keypad_session_demo

use keypad_calc::prelude::*;

#[tokio::main]
async fn main() {
    let keypad = Keypad::new();
    // sum, then sqrt of a negative
    let backend = MockBackend::with_results([14.0, f64::NAN]);
    let mut session = Session::new(backend.clone(), MemoryStore::new());

    println!("Keypad:");
    print!("{}", keypad.render());
    println!();

    let clicks = [
        "btn-9", "btn-plus", "btn-5", "btn-equals", "btn-ac", "btn-minus", "btn-4", "btn-sqrt",
    ];
    for id in clicks {
        let Some(token) = keypad.handle_click(id) else {
            continue;
        };
        let outcome = session.input(&token).await;
        let display = session.display();
        println!(
            "{id:<11} {token:<2} -> {outcome:?}\n    [{}] {}",
            display.upper, display.expression
        );
    }

    println!("\nRequests sent:");
    for request in backend.requests() {
        println!("  {} {:?}", request.operation, request.query_params());
    }

    println!("\nHistory:");
    for line in session.display().history {
        println!("  {line}");
    }
}
