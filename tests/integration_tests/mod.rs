mod identity;
mod jacobian;
mod mixed_precision;
mod scenarios;
