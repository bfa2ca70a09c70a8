use anyhow::{Context, Result};

use folio::config::Config;
use folio::publications::bibtex::convert;
use folio::publications::orcid::{sync, OrcidId};

use crate::{BibtexArgs, OrcidArgs};

pub fn bibtex_cmd(config: &Config, args: BibtexArgs) -> Result<()> {
    let input = args.input.unwrap_or_else(|| config.site_path(&config.publications.bibtex_input));
    let output = args.output.unwrap_or_else(|| config.site_path(&config.publications.bibtex_output));

    let count = convert(&input, &output)
        .with_context(|| format!("Unable to convert {}", input.display()))?;
    println!("Converted {} entries into {}", count, output.display());
    Ok(())
}

pub fn orcid_cmd(config: &Config, args: OrcidArgs) -> Result<()> {
    // The identifier is checked before anything is read
    let raw_id = args.orcid_id.or_else(|| config.orcid.as_ref().map(|orcid| orcid.id.clone()));
    let id = OrcidId::parse(raw_id.as_deref())?;

    let output = args.output.unwrap_or_else(|| config.site_path(&config.publications.orcid_output));
    let count = sync(&id, &args.input, &output)?;
    println!("Wrote {} publications for {} into {}", count, id, output.display());
    Ok(())
}
