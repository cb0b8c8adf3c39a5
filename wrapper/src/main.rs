fn main() {
    panel_wrapper::run_main()
}
