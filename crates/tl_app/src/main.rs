fn main() -> eframe::Result<()> {
    env_logger::init();
    tl_app::launch()
}
