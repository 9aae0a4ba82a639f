// Order command implementations
use rust_decimal::Decimal;
use tracing::{error, info};
use trading_bot::retry::RetryPolicy;
use trading_bot::web::{self, WebState};
use trading_bot::{
    orders, validation, Config, ExchangeClient, MockExchange, Order, OrderId, OrderType, Side,
    TimeInForce, TradingError, TradingResult,
};

const RULE_WIDTH: usize = 55;

pub struct OrderArgs {
    pub symbol: String,
    pub side: Side,
    pub order_type: OrderType,
    pub quantity: Decimal,
    pub price: Option<Decimal>,
    pub stop_price: Option<Decimal>,
    pub time_in_force: TimeInForce,
}

fn rule() -> String {
    "─".repeat(RULE_WIDTH)
}

fn print_summary(args: &OrderArgs) {
    println!("\n{}", rule());
    println!("  ORDER REQUEST SUMMARY");
    println!("{}", rule());
    println!("  Symbol    : {}", args.symbol);
    println!("  Side      : {}", args.side);
    println!("  Type      : {}", args.order_type);
    println!("  Quantity  : {}", args.quantity);
    if let (OrderType::Limit, Some(price)) = (args.order_type, args.price) {
        println!("  Price     : {}", price);
    }
    if let (OrderType::StopMarket, Some(stop_price)) = (args.order_type, args.stop_price) {
        println!("  Stop Price: {}", stop_price);
    }
    println!("{}", rule());
}

fn print_response(order: &Order) {
    println!("  ORDER RESPONSE");
    println!("{}", rule());
    for (label, value) in orders::response_rows(order) {
        println!("  {:<14}: {}", label, value);
    }
    println!("{}\n", rule());
}

/// Client for the configured exchange, or for an in-process one bound to
/// `server.host:server.port`
async fn connect(config: &Config, remote: bool) -> TradingResult<ExchangeClient> {
    let mut exchange = config.exchange.clone();

    if !remote {
        let addr = MockExchange::from_config(config)
            .spawn(&config.server.bind_address())
            .await?;
        exchange.base_url = format!("http://{}", addr);
    }

    Ok(ExchangeClient::new(&exchange)?)
}

pub async fn place_order(args: &OrderArgs, config: &Config, remote: bool) -> TradingResult<()> {
    validation::check_required_prices(args.order_type, args.price, args.stop_price)?;

    let client = connect(config, remote).await?;
    print_summary(args);

    let quantity = args.quantity.to_string();
    let result = match args.order_type {
        OrderType::Market => {
            orders::place_market_order(&client, &args.symbol, args.side, &quantity).await
        }
        OrderType::Limit => {
            let price = args.price.unwrap_or_default().to_string();
            orders::place_limit_order(
                &client,
                &args.symbol,
                args.side,
                &quantity,
                &price,
                args.time_in_force,
            )
            .await
        }
        OrderType::StopMarket => {
            let stop_price = args.stop_price.unwrap_or_default().to_string();
            orders::place_stop_market_order(&client, &args.symbol, args.side, &quantity, &stop_price)
                .await
        }
    };

    let order = result.map_err(|e| {
        error!("Order failed: {}", e);
        TradingError::from(e)
    })?;

    print_response(&order);
    println!("  ✓ Success! orderId = {}\n", order.id);
    Ok(())
}

pub async fn query_order(order_id: OrderId, config: &Config) -> TradingResult<()> {
    let client = ExchangeClient::new(&config.exchange)?;
    info!("Querying orderId={} on {}", order_id, client.base_url());

    let order = RetryPolicy::default()
        .execute(|| client.query_order(order_id))
        .await?;

    println!("\n{}", rule());
    print_response(&order);
    Ok(())
}

pub async fn serve_web(config: &Config, remote: bool) -> TradingResult<()> {
    let client = connect(config, remote).await?;
    web::run(WebState::new(client), &config.web.bind_address()).await
}
