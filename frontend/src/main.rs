fn main() {
    learnstream_frontend::start();
}
