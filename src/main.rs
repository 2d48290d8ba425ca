fn main() {
    prompt_engine::app::cli::run();
}
