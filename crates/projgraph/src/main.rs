fn main() -> anyhow::Result<()> {
    projgraph_lib::main()
}
