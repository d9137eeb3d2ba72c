//! Cornell box example.
//!
//! Renders the classic box with an area light, a glass sphere, and an
//! instanced triangle-mesh pyramid, then saves to PPM format.

use anyhow::Context;
use ember_trace::{
    render, Background, BvhNode, Camera, Color, Dielectric, DiffuseLight, Hittable, Lambertian,
    Metal, Projection, Recolor, RenderConfig, RotateY, Translate, TriangleMesh, Vec3, XyRect,
    XzRect, YzRect,
};
use std::fs::File;
use std::io::Write;
use std::sync::Arc;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let start = std::time::Instant::now();
    let world = build_scene()?;
    println!("Scene built in {:?}", start.elapsed());

    let camera = Camera::new(
        Vec3::new(278.0, 278.0, -800.0), // look_from
        Vec3::new(278.0, 278.0, 0.0),    // look_at
        Vec3::new(0.0, 1.0, 0.0),        // vup
        40.0,                            // vfov
        1.0,                             // aspect ratio
        0.0,                             // aperture (pinhole)
        10.0,                            // focus distance
    );

    let config = RenderConfig {
        samples_per_pixel: 100,
        max_depth: 10,
        background: Background::Solid(Color::ZERO),
        projection: Projection::Perspective,
    };

    let (width, height) = (500, 500);
    println!("Rendering {}x{} @ {} spp...", width, height, config.samples_per_pixel);

    let start = std::time::Instant::now();
    let image = render(&camera, &world, width, height, &config, 42);
    println!("Rendered in {:?}", start.elapsed());

    let filename = "cornell.ppm";
    File::create(filename)
        .and_then(|mut file| file.write_all(&image.to_ppm()))
        .with_context(|| format!("failed to save {filename}"))?;
    println!("Saved to {}", filename);

    Ok(())
}

fn build_scene() -> anyhow::Result<BvhNode> {
    let red = Arc::new(Lambertian::new(Color::new(0.65, 0.05, 0.05)));
    let white = Arc::new(Lambertian::new(Color::new(0.73, 0.73, 0.73)));
    let green = Arc::new(Lambertian::new(Color::new(0.12, 0.45, 0.15)));
    let light = Arc::new(DiffuseLight::new(Color::new(15.0, 15.0, 15.0)));

    let mut objects: Vec<Arc<dyn Hittable>> = Vec::new();

    // Box walls
    objects.push(Arc::new(YzRect::new(0.0, 555.0, 0.0, 555.0, 555.0, green)));
    objects.push(Arc::new(YzRect::new(0.0, 555.0, 0.0, 555.0, 0.0, red)));
    objects.push(Arc::new(XzRect::new(
        213.0,
        343.0,
        227.0,
        332.0,
        554.0,
        light,
    )));
    objects.push(Arc::new(XzRect::new(
        0.0,
        555.0,
        0.0,
        555.0,
        0.0,
        white.clone(),
    )));
    objects.push(Arc::new(XzRect::new(
        0.0,
        555.0,
        0.0,
        555.0,
        555.0,
        white.clone(),
    )));
    objects.push(Arc::new(XyRect::new(
        0.0,
        555.0,
        0.0,
        555.0,
        555.0,
        white.clone(),
    )));

    // Glass sphere on the floor
    objects.push(Arc::new(ember_trace::Sphere::new(
        Vec3::new(190.0, 90.0, 190.0),
        90.0,
        Arc::new(Dielectric::new(1.5)),
    )));

    // Mesh pyramid, shared between two instances with different
    // orientations and surfaces
    let pyramid: Arc<dyn Hittable> = Arc::new(pyramid_mesh(white)?);

    objects.push(Arc::new(Translate::new(
        Arc::new(RotateY::new(pyramid.clone(), 18.0)),
        Vec3::new(265.0, 0.0, 295.0),
    )));

    let mirrored = Arc::new(Recolor::new(
        pyramid,
        Arc::new(Metal::new(Color::new(0.8, 0.85, 0.88), 0.05)),
    ));
    objects.push(Arc::new(Translate::new(
        Arc::new(RotateY::new(mirrored, -15.0)),
        Vec3::new(80.0, 0.0, 350.0),
    )));

    println!("Created {} objects", objects.len());
    Ok(BvhNode::new(objects)?)
}

/// Square-based pyramid, 160 wide and 220 tall, sitting on y = 0 with
/// its base centered at the origin.
fn pyramid_mesh(material: Arc<dyn ember_trace::Material>) -> anyhow::Result<TriangleMesh> {
    let positions = [
        Vec3::new(-80.0, 0.0, -80.0),
        Vec3::new(80.0, 0.0, -80.0),
        Vec3::new(80.0, 0.0, 80.0),
        Vec3::new(-80.0, 0.0, 80.0),
        Vec3::new(0.0, 220.0, 0.0),
    ];
    let indices = [
        0, 1, 4, // sides
        1, 2, 4,
        2, 3, 4,
        3, 0, 4,
        0, 2, 1, // base
        0, 3, 2,
    ];
    Ok(TriangleMesh::new(&positions, &indices, material)?)
}
