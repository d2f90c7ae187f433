use std::fs;
use std::path::{Path, PathBuf};

use locknload_logo::renderer::FontChoice;
use locknload_logo::{generate, GenerateOptions, LogoConfig, LogoError, Target};

fn config_for(root: &Path) -> LogoConfig {
    LogoConfig {
        font_paths: vec![root.join("fonts/missing-a.ttf"), root.join("fonts/missing-b.ttf")],
        targets: vec![
            Target {
                name: "customer-app".to_string(),
                dir: root.join("customer-app/public"),
            },
            Target {
                name: "admin-app".to_string(),
                dir: root.join("admin-app/public"),
            },
        ],
        ..LogoConfig::default()
    }
}

fn create_target_dirs(config: &LogoConfig) {
    for target in &config.targets {
        fs::create_dir_all(&target.dir).unwrap();
    }
}

#[test]
fn writes_all_four_files_with_builtin_font() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(dir.path());
    create_target_dirs(&config);

    let report = generate(&config, &GenerateOptions::default()).unwrap();

    assert_eq!(report.font, FontChoice::BuiltIn);
    let expected: Vec<PathBuf> = ["customer-app", "admin-app"]
        .iter()
        .flat_map(|app| {
            let public = dir.path().join(app).join("public");
            [public.join("logo.png"), public.join("favicon.ico")]
        })
        .collect();
    for path in &expected {
        assert!(path.is_file(), "missing {}", path.display());
    }
    assert_eq!(report.logos.len() + report.favicons.len(), 4);

    let logo = image::open(&report.logos[0]).unwrap();
    assert_eq!((logo.width(), logo.height()), (500, 500));

    let favicon = image::open(&report.favicons[1]).unwrap();
    assert_eq!((favicon.width(), favicon.height()), (64, 64));
}

#[test]
fn both_logo_copies_are_identical() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(dir.path());
    create_target_dirs(&config);

    let report = generate(&config, &GenerateOptions::default()).unwrap();
    let customer = image::open(&report.logos[0]).unwrap().to_rgb8();
    let admin = image::open(&report.logos[1]).unwrap().to_rgb8();
    assert_eq!(customer.as_raw(), admin.as_raw());
}

#[test]
fn repeated_runs_produce_same_pixels() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(dir.path());
    create_target_dirs(&config);

    let first = generate(&config, &GenerateOptions::default()).unwrap();
    let before = image::open(&first.logos[0]).unwrap().to_rgb8();
    let favicon_before = image::open(&first.favicons[0]).unwrap().to_rgba8();

    let second = generate(&config, &GenerateOptions::default()).unwrap();
    let after = image::open(&second.logos[0]).unwrap().to_rgb8();
    let favicon_after = image::open(&second.favicons[0]).unwrap().to_rgba8();

    assert_eq!(before.as_raw(), after.as_raw());
    assert_eq!(favicon_before.as_raw(), favicon_after.as_raw());
    assert_eq!(first.layout, second.layout);
}

#[test]
fn labels_are_centered_on_the_canvas() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(dir.path());
    create_target_dirs(&config);

    let report = generate(&config, &GenerateOptions::default()).unwrap();
    let texts: Vec<&str> = report.layout.iter().map(|p| p.text.as_str()).collect();
    assert_eq!(texts, vec!["LOCK", "N", "LOAD"]);
    for placement in &report.layout {
        assert_eq!(placement.x, (500 - placement.bounds.width()) / 2);
    }
}

#[test]
fn missing_output_directory_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(dir.path());

    let err = generate(&config, &GenerateOptions::default()).unwrap_err();
    assert!(format!("{:#}", err).contains("customer-app"));
    assert!(!dir.path().join("admin-app/public/logo.png").exists());
}

#[test]
fn create_dirs_makes_targets() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(dir.path());
    let options = GenerateOptions {
        create_dirs: true,
        ..GenerateOptions::default()
    };

    let report = generate(&config, &options).unwrap();
    assert!(report.favicons.iter().all(|p| p.is_file()));
}

#[test]
fn strict_font_refuses_builtin_fallback() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(dir.path());
    create_target_dirs(&config);
    let options = GenerateOptions {
        strict_font: true,
        ..GenerateOptions::default()
    };

    let err = generate(&config, &options).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<LogoError>(),
        Some(LogoError::NoFont { checked: 2 })
    ));
}

#[test]
fn first_present_candidate_wins() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = config_for(dir.path());
    create_target_dirs(&config);

    let fonts = dir.path().join("fonts");
    fs::create_dir_all(&fonts).unwrap();
    let earlier = fonts.join("Earlier-Bold.ttf");
    let later = fonts.join("Later-Bold.ttf");
    fs::write(&earlier, b"not a font").unwrap();
    fs::write(&later, b"not a font either").unwrap();
    config.font_paths = vec![fonts.join("absent.ttf"), earlier.clone(), later];

    // The selected file is loaded and, being corrupt, aborts the run
    let err = generate(&config, &GenerateOptions::default()).unwrap_err();
    match err.downcast_ref::<LogoError>() {
        Some(LogoError::FontParse { name, .. }) => {
            assert_eq!(name, &earlier.display().to_string())
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

const DEJAVU_BOLD: &str = "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf";

#[test]
fn renders_with_truetype_candidate() {
    let font = Path::new(DEJAVU_BOLD);
    if !font.is_file() {
        eprintln!("skipping: {} not installed", DEJAVU_BOLD);
        return;
    }

    let dir = tempfile::tempdir().unwrap();
    let mut config = config_for(dir.path());
    create_target_dirs(&config);
    config.font_paths.insert(1, font.to_path_buf());

    let report = generate(&config, &GenerateOptions::default()).unwrap();
    assert_eq!(report.font, FontChoice::Candidate(font.to_path_buf()));

    let logo = image::open(&report.logos[0]).unwrap().to_rgb8();
    let background = image::Rgb([233, 78, 36]);
    for placement in &report.layout {
        let bounds = placement.bounds;
        assert!(bounds.width() > 0, "{} measured empty", placement.text);
        assert_eq!(placement.x, (500 - bounds.width()) / 2);

        // ink stays on the canvas
        let (left, right) = (placement.x + bounds.left, placement.x + bounds.right);
        let (top, bottom) = (placement.y + bounds.top, placement.y + bounds.bottom);
        assert!(left >= 0 && right <= 500, "{} spills horizontally", placement.text);
        assert!(top >= 0 && bottom <= 500, "{} spills vertically", placement.text);

        // and lands where it was measured
        let inked = (left..right)
            .flat_map(|x| (top..bottom).map(move |y| (x, y)))
            .filter(|&(x, y)| *logo.get_pixel(x as u32, y as u32) != background)
            .count();
        assert!(inked > 0, "{} drew nothing", placement.text);
    }

    // larger labels measure wider than the small "N"
    assert!(report.layout[0].bounds.width() > report.layout[1].bounds.width());

    // outside the measured boxes the background is untouched
    assert_eq!(*logo.get_pixel(0, 0), background);
    assert_eq!(*logo.get_pixel(250, 50), background);
    assert_eq!(*logo.get_pixel(250, 450), background);
}
