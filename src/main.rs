fn main() {
    automatik_labs_lib::run()
}
