/// Example: Embedding the checker in a Rust application
///
/// Run with: cargo run --example embed
fn main() {
    // One-liner: check source directly
    println!("--- Check inline code ---");
    match sintaxis::check("def saludo(nombre):\n    print(\"Hola\", nombre)\nsaludo(\"mundo\")\n") {
        Ok(()) => println!("valid"),
        Err(e) => println!("Error: {}", e),
    }

    // Step-by-step: tokenize, then parse
    println!("\n--- Tokenize + Parse ---");
    let source = "función suma(a, b):\n    resultado a + b\n";
    let tokens = sintaxis::tokenize_with(source, sintaxis::LexerConfig::localized()).unwrap();
    for token in &tokens {
        println!("{}", token);
    }
    let mut parser = sintaxis::Parser::new(tokens);
    match parser.parse() {
        Ok(()) => println!("{} statements", parser.statements()),
        Err(e) => println!("Error: {}", e),
    }

    // A positioned error
    println!("\n--- Error ---");
    if let Err(e) = sintaxis::check("def f(a, b)\n    return a\n") {
        println!("{} (at {:?})", e, e.position());
    }

    // Check a file
    println!("\n--- Check file ---");
    match sintaxis::check_file("tests/programs/suma.src", Default::default()) {
        Ok(()) => println!("File is valid"),
        Err(e) => println!("Error: {}", e),
    }
}
