use super::load_model;
use crate::cli::InfoArgs;
use crate::error::Result;

pub fn run(args: InfoArgs) -> Result<()> {
    let mut model = load_model(&args.input)?;
    model.rebuild_neighbors();
    print!("{}", describe(&model, &args.input.display().to_string()));
    Ok(())
}

fn describe(model: &tono::engine::model::KnotModel, name: &str) -> String {
    let params = model.parameters();
    let mut out = format!(
        "Knot: {name}\n\
         Strands: {}\n\
         Atoms: {}\n\
         Atom radius: {}\n\
         Leash length: {}\n\
         Delta: {}\n\
         Eta: {}\n\
         Skipped: {}\n",
        model.strand_count(),
        model.total_atoms(),
        params.atom_radius,
        params.leash_length,
        params.delta,
        params.eta,
        params.skipped,
    );

    for (index, strand) in model.knot().strands().iter().enumerate() {
        out.push_str(&format!(
            "  Strand {index}: {} atom(s), arc length {:.4}\n",
            strand.len(),
            strand.arc_length()
        ));
    }

    out.push_str(&format!(
        "Max leash excess: {:.4}\n",
        model.max_leash_violation()
    ));
    match model.min_neighbor_separation() {
        Some(d) => out.push_str(&format!(
            "Min neighbor separation: {d:.4} (contact distance {:.4})\n",
            params.contact_distance()
        )),
        None => out.push_str("Min neighbor separation: no neighbors\n"),
    }
    out
}
