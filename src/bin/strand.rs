// Strand command-line playground
// Usage: strand [--json] <literal|pattern|list> ...

fn main() {
    strand::cli::run();
}
