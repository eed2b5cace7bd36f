fn main() {
    aion2_guide::app::cli::run();
}
