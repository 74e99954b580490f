use keepsake_lut::compile::BuildCtx;

fn main() -> Result<(), keepsake_lut::LutError> {
	let ctx = BuildCtx::from_env()?;

	let manifest = ctx.load_manifest("hierarchy.toml")?;
	let config = ctx.load_config("keepsake.toml")?;
	let table = keepsake_lut::generate_from_manifest(&manifest, &config)?;
	ctx.write_table("retainer_table.rs", &table)?;

	Ok(())
}
