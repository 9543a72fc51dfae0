fn main() -> anyhow::Result<()> {
    gl_hierarchy::run()
}
