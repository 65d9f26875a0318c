use super::{apply_resampling, load_model, save_model};
use crate::cli::ResampleArgs;
use crate::config::apply_overrides;
use crate::error::{CliError, Result};
use tracing::info;

pub fn run(args: ResampleArgs) -> Result<()> {
    if args.interpolate == 0 && !args.rethread {
        return Err(CliError::Argument(
            "Nothing to do: pass --interpolate N and/or --rethread.".to_string(),
        ));
    }

    let mut model = load_model(&args.input)?;
    let parameters = apply_overrides(*model.parameters(), args.parameters)?;
    model.set_parameters(parameters)?;

    info!(
        interpolate = args.interpolate,
        rethread = args.rethread,
        "Resampling knot."
    );
    apply_resampling(&mut model, args.interpolate, args.rethread);

    save_model(&model, &args.output)?;
    println!("Resampled knot written to: {}", args.output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::ParameterOverrides;
    use std::fs;
    use tempfile::tempdir;
    use tono::engine::model::KnotModel;

    #[test]
    fn interpolates_and_writes_output() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.txt");
        let output = dir.path().join("out.txt");
        fs::write(
            &input,
            "1.0\t1.5\t0.1\t0.2\t1\ncomment\n0\t0\t0\n4\t0\t0\n8\t0\t0\n",
        )
        .unwrap();

        run(ResampleArgs {
            input,
            output: output.clone(),
            interpolate: 1,
            rethread: false,
            parameters: ParameterOverrides::default(),
        })
        .unwrap();

        let model = KnotModel::load_from_path(&output).unwrap();
        assert_eq!(model.strand(0).unwrap().len(), 5);
        assert_eq!(model.parameters().leash_length, 1.5);
    }

    #[test]
    fn rethread_uses_overridden_leash_length() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.txt");
        let output = dir.path().join("out.txt");
        fs::write(&input, "1.0\t1.5\ncomment\n0\t0\t0\n10\t0\t0\n").unwrap();

        run(ResampleArgs {
            input,
            output: output.clone(),
            interpolate: 0,
            rethread: true,
            parameters: ParameterOverrides {
                leash_length: Some(2.5),
                ..Default::default()
            },
        })
        .unwrap();

        let model = KnotModel::load_from_path(&output).unwrap();
        let xs: Vec<f32> = model
            .strand(0)
            .unwrap()
            .iter()
            .map(|a| a.position.x)
            .collect();
        assert_eq!(xs, vec![0.0, 2.5, 5.0, 7.5]);
        assert_eq!(model.parameters().leash_length, 2.5);
    }

    #[test]
    fn nothing_to_do_is_an_argument_error() {
        let dir = tempdir().unwrap();
        let result = run(ResampleArgs {
            input: dir.path().join("in.txt"),
            output: dir.path().join("out.txt"),
            interpolate: 0,
            rethread: false,
            parameters: ParameterOverrides::default(),
        });
        assert!(matches!(result, Err(CliError::Argument(_))));
    }

    #[test]
    fn malformed_input_reports_the_path() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("bad.txt");
        fs::write(&input, "").unwrap();

        let result = run(ResampleArgs {
            input,
            output: dir.path().join("out.txt"),
            interpolate: 1,
            rethread: false,
            parameters: ParameterOverrides::default(),
        });
        assert!(matches!(result, Err(CliError::FileParsing { .. })));
    }
}
