use anyhow::Result;

#[cfg(feature = "camera")]
pub fn run() -> Result<()> {
    use anyhow::Context;
    use handpan_core::camera::list_cameras;

    let cameras = list_cameras().context("Failed to query cameras")?;
    if cameras.is_empty() {
        println!("No cameras found");
        return Ok(());
    }

    println!("{:>6}  {:<32}  {}", "Index", "Name", "Description");
    println!("{}", "-".repeat(60));
    for cam in &cameras {
        println!("{:>6}  {:<32}  {}", cam.index, cam.name, cam.description);
    }
    Ok(())
}

#[cfg(not(feature = "camera"))]
pub fn run() -> Result<()> {
    anyhow::bail!("handpan was built without camera support (enable the `camera` feature)")
}
