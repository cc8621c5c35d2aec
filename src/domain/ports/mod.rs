pub mod quote_oracle;
pub mod sampler_observer;
