use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::info;
use stlform_core::{Axis, EulerDegrees, Pivot, ScaleOutcome, TriangleSoup, Vector3d};
use stlform_io::{read_mesh, write_mesh, StlFormat, StlWriteOptions};
use stlform_session::{PoseTarget, ScaleTarget, TransformJob, TransformSession};
use stlform_view::{dimensions_text, render_mesh, DetailLevel, Readout, RenderOptions};

/// Rotate, shift and rescale STL meshes
#[derive(Debug, clap::Parser)]
#[command(version)]
pub(crate) struct Args {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub subcommand: Subcommand,
}

#[derive(clap::Subcommand, Debug)]
pub(crate) enum Subcommand {
    /// Print triangle count, bounds, dimensions and centroid.
    Info {
        /// STL file to inspect
        input: PathBuf,
        /// Print the readout as JSON
        #[arg(long)]
        json: bool,
    },
    /// Apply one rotation, shift and rescale and write the result.
    Transform {
        input: PathBuf,
        #[arg(short, long)]
        output: PathBuf,

        /// Degrees about X, applied first
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        rotate_x: f64,
        /// Degrees about Y, applied second
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        rotate_y: f64,
        /// Degrees about Z, applied last
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        rotate_z: f64,

        /// Millimeters along X, applied after rotation
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        shift_x: f64,
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        shift_y: f64,
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        shift_z: f64,

        #[arg(long, value_enum, default_value_t = PivotArg::Origin)]
        pivot: PivotArg,

        /// Uniformly scale so one axis reaches a length, e.g. `X=100`
        #[arg(long, value_parser = parse_scale_target)]
        scale_uniform: Option<ScaleTarget>,

        /// Scale one axis to a length, e.g. `Z=12.5` (repeatable)
        #[arg(long, value_parser = parse_scale_target)]
        scale_axis: Vec<ScaleTarget>,

        #[arg(long, value_enum, default_value_t = FormatArg::Binary)]
        format: FormatArg,
    },
    /// Run a JSON transform job and write the result.
    Run {
        input: PathBuf,
        /// Job file listing the steps to apply
        #[arg(short, long)]
        job: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
        #[arg(long, value_enum, default_value_t = FormatArg::Binary)]
        format: FormatArg,
    },
    /// Write a plotly figure of the mesh as JSON.
    Plot {
        input: PathBuf,
        /// Figure file, stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Keep at most this many triangles (at least 1)
        #[arg(long, value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
        preview: Option<usize>,
        /// Overlay triangle edges
        #[arg(long)]
        edges: bool,
        #[arg(long, default_value_t = 600)]
        height: u32,
        #[arg(long)]
        title: Option<String>,
    },
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PivotArg {
    Origin,
    Centroid,
}

impl From<PivotArg> for Pivot {
    fn from(value: PivotArg) -> Self {
        match value {
            PivotArg::Origin => Pivot::Origin,
            PivotArg::Centroid => Pivot::Centroid,
        }
    }
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FormatArg {
    Binary,
    Ascii,
}

impl From<FormatArg> for StlWriteOptions {
    fn from(value: FormatArg) -> Self {
        StlWriteOptions::with_format(match value {
            FormatArg::Binary => StlFormat::Binary,
            FormatArg::Ascii => StlFormat::Ascii,
        })
    }
}

/// Parse `AXIS=LENGTH`
fn parse_scale_target(s: &str) -> Result<ScaleTarget, String> {
    let (axis, length) = s
        .split_once('=')
        .ok_or_else(|| format!("expected AXIS=LENGTH, got `{s}`"))?;
    let axis: Axis = axis.parse().map_err(|e| format!("{e}"))?;
    let length: f64 = length
        .trim()
        .parse()
        .map_err(|e| format!("invalid length `{length}`: {e}"))?;
    Ok(ScaleTarget { axis, length })
}

fn load(path: &Path) -> Result<TriangleSoup> {
    let mesh = read_mesh(path).with_context(|| format!("reading {}", path.display()))?;
    info!("read {} triangles from {}", mesh.triangle_count(), path.display());
    Ok(mesh)
}

fn save(mesh: &TriangleSoup, path: &Path, format: FormatArg) -> Result<()> {
    write_mesh(mesh, path, &format.into()).with_context(|| format!("writing {}", path.display()))?;
    info!("wrote {} triangles to {}", mesh.triangle_count(), path.display());
    Ok(())
}

/// Human or JSON readout for `info`
fn info_text(mesh: &TriangleSoup, json: bool) -> Result<String> {
    let readout = Readout::of(mesh);
    if json {
        return Ok(serde_json::to_string_pretty(&readout)?);
    }
    let c = readout.centroid;
    Ok(format!(
        "triangles: {}\n{}\n{}\ncentroid: ({:.3}, {:.3}, {:.3})",
        readout.triangle_count,
        stlform_view::bounds_text(mesh),
        dimensions_text(mesh),
        c.x,
        c.y,
        c.z
    ))
}

fn report_scale(axis: Axis, outcome: ScaleOutcome) {
    if outcome == ScaleOutcome::Skipped {
        eprintln!("{axis} extent is zero, scale skipped");
    }
}

pub(crate) fn exec(subcommand: Subcommand) -> Result<()> {
    match subcommand {
        Subcommand::Info { input, json } => {
            let mesh = load(&input)?;
            println!("{}", info_text(&mesh, json)?);
            Ok(())
        }

        Subcommand::Transform {
            input,
            output,
            rotate_x,
            rotate_y,
            rotate_z,
            shift_x,
            shift_y,
            shift_z,
            pivot,
            scale_uniform,
            scale_axis,
            format,
        } => {
            let mut session = TransformSession::new(load(&input)?);
            session.set_pivot(pivot.into());
            session
                .apply_target(PoseTarget::new(
                    EulerDegrees::new(rotate_x, rotate_y, rotate_z),
                    Vector3d::new(shift_x, shift_y, shift_z),
                ))
                .context("applying rotation and shift")?;
            if let Some(ScaleTarget { axis, length }) = scale_uniform {
                report_scale(axis, session.scale_uniform(axis, length)?);
            }
            for ScaleTarget { axis, length } in scale_axis {
                report_scale(axis, session.scale_axis_absolute(axis, length)?);
            }
            save(session.mesh(), &output, format)?;
            println!("{}", session.bounds_text());
            Ok(())
        }

        Subcommand::Run {
            input,
            job,
            output,
            format,
        } => {
            let plan = TransformJob::from_path(&job)
                .with_context(|| format!("loading job {}", job.display()))?;
            let mut session = TransformSession::new(load(&input)?);
            let outcomes = plan.run(&mut session).context("running job")?;
            info!("ran {} job steps", outcomes.len());
            save(session.mesh(), &output, format)?;
            println!("{}", session.bounds_text());
            Ok(())
        }

        Subcommand::Plot {
            input,
            output,
            preview,
            edges,
            height,
            title,
        } => {
            let mesh = load(&input)?;
            let mut options = RenderOptions::default().with_edges(edges).with_height(height);
            if let Some(max_triangles) = preview {
                options.detail = DetailLevel::Preview { max_triangles };
            }
            if let Some(title) = title {
                options = options.with_title(title);
            }
            let json = render_mesh(&mesh, &options).to_json()?;
            match output {
                Some(path) => std::fs::write(&path, json)
                    .with_context(|| format!("writing {}", path.display()))?,
                None => println!("{json}"),
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{CommandFactory, Parser};

    #[test]
    fn test_command_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_scale_target() {
        assert_eq!(
            parse_scale_target("x=100").unwrap(),
            ScaleTarget {
                axis: Axis::X,
                length: 100.0
            }
        );
        assert_eq!(parse_scale_target("Z= 12.5").unwrap().length, 12.5);
        assert!(parse_scale_target("X100").is_err());
        assert!(parse_scale_target("W=1").is_err());
        assert!(parse_scale_target("Y=tall").is_err());
    }

    #[test]
    fn test_transform_flags() {
        let args = Args::try_parse_from([
            "stlform",
            "-vv",
            "transform",
            "part.stl",
            "-o",
            "out.stl",
            "--rotate-z",
            "-90",
            "--pivot",
            "centroid",
            "--scale-axis",
            "X=10",
            "--scale-axis",
            "Y=20",
            "--format",
            "ascii",
        ])
        .unwrap();

        assert_eq!(args.verbose, 2);
        match args.subcommand {
            Subcommand::Transform {
                rotate_z,
                rotate_x,
                pivot,
                scale_axis,
                format,
                ..
            } => {
                assert_eq!(rotate_z, -90.0);
                assert_eq!(rotate_x, 0.0);
                assert_eq!(pivot, PivotArg::Centroid);
                assert_eq!(scale_axis.len(), 2);
                assert_eq!(scale_axis[1].axis, Axis::Y);
                assert_eq!(format, FormatArg::Ascii);
            }
            other => panic!("unexpected subcommand {other:?}"),
        }
    }

    #[test]
    fn test_transform_end_to_end() {
        let dir = std::env::temp_dir().join(format!("stlform-cli-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let input = dir.join("cube.stl");
        let output = dir.join("moved.stl");
        write_mesh(&TriangleSoup::unit_cube(), &input, &StlWriteOptions::binary()).unwrap();

        exec(Subcommand::Transform {
            input,
            output: output.clone(),
            rotate_x: 0.0,
            rotate_y: 0.0,
            rotate_z: 0.0,
            shift_x: 5.0,
            shift_y: 0.0,
            shift_z: 0.0,
            pivot: PivotArg::Origin,
            scale_uniform: None,
            scale_axis: vec![ScaleTarget {
                axis: Axis::Z,
                length: 3.0,
            }],
            format: FormatArg::Ascii,
        })
        .unwrap();

        let moved = read_mesh(&output).unwrap();
        let readout = Readout::of(&moved);
        assert_eq!(readout.bounds.min.x, 5.0);
        assert_eq!(readout.size, Vector3d::new(1.0, 1.0, 3.0));
        std::fs::remove_dir_all(&dir).unwrap();
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("stlform-cli-{name}-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn plain_transform(input: PathBuf, output: PathBuf) -> Subcommand {
        Subcommand::Transform {
            input,
            output,
            rotate_x: 0.0,
            rotate_y: 0.0,
            rotate_z: 0.0,
            shift_x: 0.0,
            shift_y: 0.0,
            shift_z: 0.0,
            pivot: PivotArg::Origin,
            scale_uniform: None,
            scale_axis: Vec::new(),
            format: FormatArg::Binary,
        }
    }

    #[test]
    fn test_transform_rejects_non_finite_values() {
        let dir = scratch_dir("nan");
        let input = dir.join("cube.stl");
        let output = dir.join("bad.stl");
        write_mesh(&TriangleSoup::unit_cube(), &input, &StlWriteOptions::binary()).unwrap();

        let mut command = plain_transform(input.clone(), output.clone());
        if let Subcommand::Transform { rotate_x, .. } = &mut command {
            *rotate_x = f64::NAN;
        }
        assert!(exec(command).is_err());

        let mut command = plain_transform(input, output.clone());
        if let Subcommand::Transform { shift_x, .. } = &mut command {
            *shift_x = f64::INFINITY;
        }
        assert!(exec(command).is_err());

        assert!(!output.exists());
        assert!(Args::try_parse_from(["stlform", "transform", "a.stl", "-o", "b.stl", "--rotate-x", "nan"]).is_ok());
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_info_json_readout() {
        let mut mesh = TriangleSoup::cube(2.0);
        stlform_core::translate(&mut mesh, Vector3d::new(1.0, 0.0, 0.0)).unwrap();

        let json: serde_json::Value = serde_json::from_str(&info_text(&mesh, true).unwrap()).unwrap();
        assert_eq!(json["triangle_count"], 12);
        assert_eq!(json["size"], serde_json::json!([2.0, 2.0, 2.0]));
        assert_eq!(json["centroid"], serde_json::json!([2.0, 1.0, 1.0]));

        let text = info_text(&mesh, false).unwrap();
        assert!(text.starts_with("triangles: 12\nX: 1.00 ~ 3.00\n"));
        assert!(text.ends_with("centroid: (2.000, 1.000, 1.000)"));

        let dir = scratch_dir("info");
        let input = dir.join("cube.stl");
        write_mesh(&mesh, &input, &StlWriteOptions::binary()).unwrap();
        exec(Subcommand::Info { input, json: true }).unwrap();
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_plot_writes_figure_file() {
        let dir = scratch_dir("plot");
        let input = dir.join("cube.stl");
        let output = dir.join("figure.json");
        write_mesh(&TriangleSoup::unit_cube(), &input, &StlWriteOptions::binary()).unwrap();

        exec(Subcommand::Plot {
            input,
            output: Some(output.clone()),
            preview: Some(4),
            edges: true,
            height: 480,
            title: Some("cube".to_string()),
        })
        .unwrap();

        let figure: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(figure["data"][0]["type"], "mesh3d");
        assert_eq!(figure["data"][0]["i"].as_array().unwrap().len(), 4);
        assert_eq!(figure["data"][1]["type"], "scatter3d");
        assert_eq!(figure["layout"]["height"], 480);
        assert_eq!(figure["layout"]["title"], "cube");
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_plot_preview_must_be_positive() {
        assert!(Args::try_parse_from(["stlform", "plot", "a.stl", "--preview", "0"]).is_err());
        assert!(Args::try_parse_from(["stlform", "plot", "a.stl", "--preview", "1"]).is_ok());
    }
}
