fn main() {
    geotrack_app::run();
}
