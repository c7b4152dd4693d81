fn main() {
    serpent::app::cli::run();
}
