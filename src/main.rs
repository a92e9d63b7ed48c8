use anyhow::Context;

fn main() -> anyhow::Result<()> {
    let args = rasterpad::BatchArgs::parse(std::env::args_os().skip(1))?;
    rasterpad::run(&args)
        .with_context(|| format!("failed to produce {}", args.output.display()))?;
    Ok(())
}
