use crate::commands::{BoundsCmd, CliError, ShowCmd};

use std::io::Write;

pub fn show(mut cmd: ShowCmd) -> Result<(), CliError> {
    if cmd.count {
        let curves: usize = cmd.path.iter().map(|spline| spline.len()).sum();
        let closed = cmd.path.iter().filter(|spline| spline.is_closed()).count();
        writeln!(&mut *cmd.output, "splines: {}", cmd.path.len())?;
        writeln!(&mut *cmd.output, "closed: {}", closed)?;
        writeln!(&mut *cmd.output, "curves: {}", curves)?;

        return Ok(());
    }

    writeln!(&mut *cmd.output, "{}", cmd.path.to_path_string(&cmd.format))?;

    Ok(())
}

pub fn bounds(mut cmd: BoundsCmd) -> Result<(), CliError> {
    let bounds = cmd.path.bounding_box();
    if !bounds.is_defined() {
        writeln!(&mut *cmd.output, "undefined")?;
        return Ok(());
    }

    writeln!(
        &mut *cmd.output,
        "{} {} {} {}",
        bounds.min.x, bounds.min.y, bounds.max.x, bounds.max.y
    )?;

    Ok(())
}
