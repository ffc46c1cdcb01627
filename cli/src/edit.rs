use crate::commands::{CliError, LerpCmd, SplitCmd, TransformCmd};

use figura::geom::Interpolate;

use log::debug;

use std::io::Write;

pub fn split(mut cmd: SplitCmd) -> Result<(), CliError> {
    if cmd.subdivide {
        let path = cmd.path.subdivide(cmd.at);
        writeln!(&mut *cmd.output, "{}", path.to_path_string(&cmd.format))?;
        return Ok(());
    }

    let (first, second) = cmd.path.split(cmd.at);
    writeln!(&mut *cmd.output, "{}", first.to_path_string(&cmd.format))?;
    writeln!(&mut *cmd.output, "{}", second.to_path_string(&cmd.format))?;

    Ok(())
}

pub fn lerp(mut cmd: LerpCmd) -> Result<(), CliError> {
    if cmd.from.len() != cmd.to.len() {
        debug!(
            "{} splines vs {}, the path switches at the end",
            cmd.from.len(),
            cmd.to.len()
        );
    }

    let interpolator = cmd.from.interpolate_to(&cmd.to);

    let Some(steps) = cmd.steps else {
        let path = interpolator.interpolate(cmd.at);
        writeln!(&mut *cmd.output, "{}", path.to_path_string(&cmd.format))?;
        return Ok(());
    };

    let steps = steps.max(1);
    for i in 0..=steps {
        let u = i as f64 / steps as f64;
        let path = interpolator.interpolate(u);
        writeln!(&mut *cmd.output, "{}", path.to_path_string(&cmd.format))?;
    }

    Ok(())
}

pub fn transform(mut cmd: TransformCmd) -> Result<(), CliError> {
    let path = cmd.path.transformed(&cmd.transform);
    if !path.is_defined() {
        debug!("The transformed path has non-finite coordinates");
    }
    writeln!(&mut *cmd.output, "{}", path.to_path_string(&cmd.format))?;

    Ok(())
}
