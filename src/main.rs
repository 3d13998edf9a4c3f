#[rocket::main]
async fn main() -> Result<(), rocket::Error> {
    fyyur::config::init_tracing();

    let _rocket = fyyur::rocket().launch().await?;
    Ok(())
}
