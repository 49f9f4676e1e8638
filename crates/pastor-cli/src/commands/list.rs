use crate::app::AppContext;

pub fn handle_list(ctx: &AppContext) -> anyhow::Result<()> {
    let database = ctx.unlock()?;
    for domain in database.domains() {
        println!("{}", domain);
    }
    Ok(())
}
