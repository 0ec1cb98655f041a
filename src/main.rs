fn main() {
    dash_platformer::game::run();
}
