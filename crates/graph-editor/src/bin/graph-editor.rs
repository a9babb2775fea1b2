use std::process::ExitCode;

fn main() -> ExitCode {
    graph_editor::cli::run()
}
